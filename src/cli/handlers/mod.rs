mod edit;
pub use edit::{cmd_mv, cmd_tidy};

use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::catalog_io;
use crate::io::config_io;
use crate::model::catalog::Catalog;
use crate::model::category::Category;
use crate::model::config::EngineConfig;
use crate::ops::names::validate_category_names;
use crate::ops::{MoveCheck, MoveRequest, check, plan_move, sort_by_display_order};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;

    match cli.command {
        Commands::Tree(args) => cmd_tree(args, &config, json),
        Commands::Check(args) => cmd_check(args, &config, json),
        Commands::Names(args) => cmd_names(args, &config, json),
        Commands::Validate(args) => cmd_validate(args, &config, json),
        Commands::Mv(args) => cmd_mv(args, &config, json),
        Commands::Tidy(args) => cmd_tidy(args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a catalog file and return it in canonical display order.
fn load_display(file: &str) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog = catalog_io::load_catalog(Path::new(file))?;
    Ok(Catalog::new(sort_by_display_order(&catalog.categories)))
}

fn resolve<'a>(
    catalog: &'a Catalog,
    key: &str,
) -> Result<&'a Category, Box<dyn std::error::Error>> {
    catalog
        .find_by_key(key)
        .ok_or_else(|| format!("category not found: {}", key).into())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_tree(
    args: FileArgs,
    config: &EngineConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_display(&args.file)?;
    if json {
        let out = TreeJson {
            categories: &catalog.categories,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_lines(&format_tree(&catalog.categories, &config.names.locale));
    }
    Ok(())
}

fn cmd_check(
    args: FileArgs,
    config: &EngineConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = catalog_io::load_catalog(Path::new(&args.file))?;
    let result = check::check_catalog(&catalog.categories, &config.names.locale);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_lines(&format_check_result(&result));
    }

    if !result.valid {
        return Err(format!("{} integrity error(s) found", result.errors.len()).into());
    }
    Ok(())
}

fn cmd_names(
    args: FileArgs,
    config: &EngineConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = catalog_io::load_catalog(Path::new(&args.file))?;
    let conflicts = validate_category_names(&catalog.categories, &config.names.locale);
    if json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
    } else {
        print_lines(&format_name_conflicts(&conflicts));
    }
    Ok(())
}

fn cmd_validate(
    args: MoveArgs,
    config: &EngineConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_display(&args.file)?;
    let dragged = resolve(&catalog, &args.key)?;
    let request = MoveRequest {
        dragged,
        target_index: args.index,
        display_list: &catalog.categories,
        categories: &catalog.categories,
    };
    let planned = plan_move(request, &config.placement);

    if json {
        let out = ValidateJson {
            check: MoveCheck::from(planned.clone().map(|_| ())),
            parent_path: planned.clone().ok().flatten(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    let parent_path = planned?;
    if !json {
        match parent_path
            .as_deref()
            .and_then(|pp| catalog.categories.iter().find(|c| c.path == pp))
        {
            Some(parent) => println!(
                "valid: {} would move under {} [{}]",
                dragged.display_name(&config.names.locale),
                parent.display_name(&config.names.locale),
                parent.path
            ),
            None => println!(
                "valid: {} would move to root level",
                dragged.display_name(&config.names.locale)
            ),
        }
    }
    Ok(())
}
