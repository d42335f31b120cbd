use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_catalog::{Product, rules_to_string};
use salsheli_lib::{Normalizer, RuleError, assigned_icon, classify};

use crate::CliError;

use super::Context;

pub(crate) fn run_rules_show(ctx: &Context) -> Result<(), CliError> {
    match &ctx.rules_dir {
        Some(dir) => log::info!("# Built-in rules overridden from {}", dir.display()),
        None => log::info!("# Built-in rules"),
    }
    let yaml = rules_to_string(&ctx.rules)?;
    log::info!("{}", yaml.trim_end());
    Ok(())
}

pub(crate) fn run_rules_normalize(ctx: &Context, text: &str) -> Result<(), CliError> {
    let normalizer = Normalizer::new(&ctx.rules.normalize)?;
    let fixed = normalizer.fix_name(text);
    if fixed == text {
        log::info!("{} {}", fixed, "(unchanged)".if_supports_color(Stdout, |t| t.dimmed()));
    } else {
        log::info!("{}", fixed);
    }
    Ok(())
}

pub(crate) fn run_rules_classify(ctx: &Context, plan_id: &str, name: &str) -> Result<(), CliError> {
    let plan = ctx
        .rules
        .reclassify_plan(plan_id)
        .ok_or_else(|| RuleError::unknown_plan(plan_id))?;

    match classify(name, &plan.rules) {
        Some(rule) => {
            let product = Product::new(name, "");
            let icon = rule
                .icon
                .as_ref()
                .and_then(|a| assigned_icon(&product, a))
                .unwrap_or(product.icon.as_str());
            log::info!(
                "{} {}",
                "->".if_supports_color(Stdout, |t| t.green()),
                rule.partition.if_supports_color(Stdout, |t| t.bold())
            );
            if let Some(label) = &rule.label {
                log::info!("   category: {label}");
            }
            log::info!("   icon:     {icon}");
        }
        None => log::info!("Stays in {}", plan.source),
    }
    Ok(())
}
