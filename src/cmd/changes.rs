use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::production_changes::{ProductionChangesRequest, production_changes};

#[derive(Debug, Clone)]
pub struct ChangesCommandArgs {
    pub repository: String,
    pub branch: String,
    pub date: Option<String>,
}

pub async fn run(ctx: &AppContext, args: ChangesCommandArgs) -> AppResult<String> {
    production_changes(
        ctx,
        ProductionChangesRequest {
            repository: args.repository,
            branch: Some(args.branch),
            date: args.date,
        },
    )
    .await
}
