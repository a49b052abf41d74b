//! `cupboard catalog` and `cupboard custom` commands

use anyhow::Result;

use crate::cli::{CatalogArgs, CustomArgs, CustomCommands};
use crate::commands::signed_in_session;
use crate::GlobalOptions;
use cupboard::core::{catalog, Ingredient};
use cupboard::ops::catalog::{add_custom_ingredient, remove_custom_ingredient};
use cupboard::util::Status;

pub fn execute(args: CatalogArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut session = signed_in_session(global_opts)?;

    if args.units {
        let units = session.measurements();
        shell.json_data("units", &units);
        for unit in units {
            shell.print(unit);
        }
        return Ok(());
    }

    let entries: Vec<&Ingredient> = match &args.search {
        Some(query) => session.search_catalog(query),
        None => session.all_ingredients().iter().collect(),
    };
    shell.json_data("catalog", &entries);

    if entries.is_empty() {
        if let Some(query) = &args.search {
            shell.note(format!("no ingredients match '{}'", query));
        }
        return Ok(());
    }

    let owned: Vec<Ingredient> = entries.into_iter().cloned().collect();
    for (category, ingredients) in catalog::group_by_category(&owned) {
        shell.print(category);
        for ingredient in ingredients {
            let name = match &args.search {
                Some(query) if shell.use_color() => highlight(&ingredient.name, query),
                _ => ingredient.name.clone(),
            };
            if ingredient.is_custom {
                shell.print(format!("  {} [custom]", name));
            } else {
                shell.print(format!("  {}", name));
            }
        }
    }
    Ok(())
}

pub fn custom(args: CustomArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut session = signed_in_session(global_opts)?;

    match args.command {
        CustomCommands::Add { name, category } => {
            let ingredient = add_custom_ingredient(&mut session, &name, &category)?;
            shell.status(Status::Created, format!("custom ingredient {}", ingredient));
            shell.json_data("custom-ingredient", &ingredient);
        }
        CustomCommands::Remove { name } => {
            remove_custom_ingredient(&mut session, &name)?;
            shell.status(Status::Removed, format!("custom ingredient {}", name.trim()));
        }
    }
    Ok(())
}

/// Wrap case-insensitive occurrences of `query` in bold.
///
/// Matching runs over whole characters of `name`, so a match always starts
/// and ends on a char boundary even when lowercasing changes byte widths.
fn highlight(name: &str, query: &str) -> String {
    let query = query.to_lowercase();
    if query.is_empty() {
        return name.to_string();
    }

    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let boundary = |i: usize| chars.get(i).map_or(name.len(), |&(offset, _)| offset);

    let mut out = String::with_capacity(name.len() + 8);
    let mut last = 0;
    let mut i = 0;
    while i < chars.len() {
        let mut lowered = String::new();
        let mut j = i;
        while j < chars.len() && lowered.len() < query.len() {
            lowered.extend(chars[j].1.to_lowercase());
            j += 1;
        }

        if lowered == query {
            let (start, end) = (boundary(i), boundary(j));
            out.push_str(&name[last..start]);
            out.push_str("\x1b[1m");
            out.push_str(&name[start..end]);
            out.push_str("\x1b[0m");
            last = end;
            i = j;
        } else {
            i += 1;
        }
    }
    out.push_str(&name[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_catalog_args(args: &[&str]) -> Result<CatalogArgs, clap::Error> {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            catalog: CatalogArgs,
        }
        TestCli::try_parse_from(args).map(|cli| cli.catalog)
    }

    #[test]
    fn test_catalog_args() {
        let args = parse_catalog_args(&["test"]).unwrap();
        assert!(args.search.is_none());
        assert!(!args.units);

        let args = parse_catalog_args(&["test", "-s", "tom"]).unwrap();
        assert_eq!(args.search.as_deref(), Some("tom"));

        assert!(parse_catalog_args(&["test", "--units", "--search", "x"]).is_err());
    }

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("Tomato", "TO"), "\x1b[1mTo\x1b[0mma\x1b[1mto\x1b[0m");
        assert_eq!(highlight("Basil", "xyz"), "Basil");
        assert_eq!(highlight("Basil", ""), "Basil");
    }

    #[test]
    fn test_highlight_mixed_width_name() {
        // U+023A lowercases to a wider char and the Kelvin sign to a narrower one,
        // so byte offsets in the lowercased text do not line up with the name.
        let name = "\u{23A}\u{23A}\u{212A}a";
        assert_eq!(
            highlight(name, "k"),
            "\u{23A}\u{23A}\x1b[1m\u{212A}\x1b[0ma"
        );
        assert_eq!(
            highlight(name, "\u{2C65}"),
            "\x1b[1m\u{23A}\x1b[0m\x1b[1m\u{23A}\x1b[0m\u{212A}a"
        );
        assert_eq!(highlight("Crème fraîche", "ÈME"), "Cr\x1b[1mème\x1b[0m fraîche");
    }
}
