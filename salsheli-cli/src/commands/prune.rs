use salsheli_import::prune_in_dir;
use salsheli_lib::RuleError;

use crate::CliError;

use super::{Context, log_dry_run, log_limited};

pub(crate) fn run_prune(ctx: &Context, plan_id: &str) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let plan = ctx
        .rules
        .prune_plan(plan_id)
        .ok_or_else(|| RuleError::unknown_plan(plan_id))?;

    let outcome = prune_in_dir(dir, plan, ctx.dry_run)?;

    log::info!("Original: {}", outcome.before);
    log::info!("Removed:  {}", outcome.removed.len());
    log::info!("Final:    {}", outcome.kept.len());
    if !outcome.removed.is_empty() {
        crate::log_blank();
        log::info!("Removed products:");
        log_limited(&outcome.removed, outcome.removed.len());
    }

    log_dry_run(ctx);
    Ok(())
}
