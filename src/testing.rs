use spin_sdk::http::Response;

use crate::AppContext;
use crate::core::db::reset_db_data;
use crate::core::errors::ApiError;
use crate::core::helpers::no_content;

/// Wipes every user and blog. Only routed when testing is enabled.
pub fn reset(ctx: &AppContext) -> Result<Response, ApiError> {
    reset_db_data(&ctx.db)?;
    Ok(no_content())
}
