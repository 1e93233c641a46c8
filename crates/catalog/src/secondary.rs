use moviepick_core::types::MovieSummary;

use crate::CatalogError;
use crate::provider::HotListSource;

/// Placeholder for the Douban hot list. Douban's API requires a partner key,
/// so this source contributes nothing until a real integration exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyHotList;

#[async_trait::async_trait]
impl HotListSource for EmptyHotList {
    fn name(&self) -> &str {
        "douban"
    }

    async fn hot_list(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        Ok(Vec::new())
    }
}
