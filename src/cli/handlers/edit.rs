use std::path::Path;

use crate::cli::commands::{MvArgs, TidyArgs};
use crate::cli::output::{TidyJson, format_tree};
use crate::io::catalog_io;
use crate::model::catalog::Catalog;
use crate::model::config::EngineConfig;
use crate::ops::state::compact_display_orders;
use crate::ops::{MoveRequest, move_category, sort_by_display_order};

use super::{load_display, print_lines, resolve};

pub fn cmd_mv(
    args: MvArgs,
    config: &EngineConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = args.target;
    let catalog = load_display(&target.file)?;
    let dragged = resolve(&catalog, &target.key)?;

    let outcome = move_category(
        MoveRequest {
            dragged,
            target_index: target.index,
            display_list: &catalog.categories,
            categories: &catalog.categories,
        },
        &config.placement,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_lines(&format_tree(
            &outcome.state.categories,
            &config.names.locale,
        ));
    }

    if args.write {
        let moved = Catalog::new(outcome.state.categories);
        catalog_io::save_catalog(Path::new(&target.file), &moved)?;
    }
    Ok(())
}

pub fn cmd_tidy(
    args: TidyArgs,
    config: &EngineConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_display(&args.file)?;
    let compacted = compact_display_orders(&catalog.categories);
    let renumbered = catalog
        .categories
        .iter()
        .zip(&compacted)
        .filter(|(before, after)| before.display_order != after.display_order)
        .count();
    let tidy = Catalog::new(sort_by_display_order(&compacted));
    tracing::info!(renumbered, "compacted display orders");

    if json {
        let out = TidyJson {
            renumbered,
            categories: &tidy.categories,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_lines(&format_tree(&tidy.categories, &config.names.locale));
    }

    if args.write {
        catalog_io::save_catalog(Path::new(&args.file), &tidy)?;
    }
    Ok(())
}
