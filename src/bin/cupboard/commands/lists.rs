//! `cupboard lists` and `cupboard list ...` commands

use anyhow::{bail, Result};

use crate::cli::{ListArgs, ListCommands};
use crate::commands::{parse_item, signed_in_session};
use crate::GlobalOptions;
use cupboard::core::List;
use cupboard::ops::{lists, IngredientForm};
use cupboard::util::{Shell, Status};

pub fn show_all(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let session = signed_in_session(global_opts)?;

    shell.json_data("lists", session.lists());
    if session.lists().is_empty() {
        shell.note("no lists yet; create one with `cupboard list create <NAME>`");
    }
    for list in session.lists() {
        shell.print(format!("{} ({})", list.name(), count(list.len(), "ingredient")));
    }
    Ok(())
}

pub fn execute(args: ListArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut session = signed_in_session(global_opts)?;

    match args.command {
        ListCommands::Show { name } => match session.list(name.trim()) {
            Some(list) => print_list(shell, list),
            None => bail!("list '{}' not found", name.trim()),
        },
        ListCommands::Create { name, items } => {
            let seed: Vec<IngredientForm> = items.iter().map(|i| parse_item(i)).collect();
            let name = lists::create_list(&mut session, &name, &seed)?;
            shell.status(Status::Created, format!("list {}", name));
        }
        ListCommands::Delete { name } => {
            lists::delete_list(&mut session, &name)?;
            shell.status(Status::Deleted, format!("list {}", name.trim()));
        }
        ListCommands::Rename { old_name, new_name } => {
            let new_name = lists::rename_list(&mut session, &old_name, &new_name)?;
            shell.status(Status::Renamed, format!("{} -> {}", old_name.trim(), new_name));
        }
        ListCommands::Add { list, ingredient } => {
            let added = lists::add_ingredient(&mut session, &list, &ingredient.into())?;
            shell.status(Status::Added, format!("{} to {}", added, list.trim()));
            if let Some(entry) = session
                .list(list.trim())
                .and_then(|l| l.find(&added.name, added.is_custom))
            {
                shell.json_data("ingredient", entry);
            }
        }
        ListCommands::Remove {
            list,
            ingredient,
            custom,
        } => {
            let removed = lists::remove_ingredient(&mut session, &list, &ingredient, custom)?;
            shell.status(Status::Removed, format!("{} from {}", removed.name, list.trim()));
        }
        ListCommands::Update {
            list,
            ingredient,
            amount,
            unit,
            custom,
        } => {
            let form = IngredientForm {
                amount: Some(amount),
                unit,
                custom,
                ..IngredientForm::new(ingredient)
            };
            let updated = lists::update_ingredient(&mut session, &list, &form)?;
            shell.status(Status::Updated, format!("{} in {}", updated, list.trim()));
            shell.json_data("ingredient", &updated);
        }
        ListCommands::Move {
            ingredient,
            from,
            to,
            custom,
        } => {
            let moved = lists::move_ingredient(&mut session, &from, &to, &ingredient, custom)?;
            shell.status(
                Status::Moved,
                format!("{} from {} to {}", moved.name, from.trim(), to.trim()),
            );
        }
    }
    Ok(())
}

fn print_list(shell: &Shell, list: &List) {
    shell.json_data("list", list);
    shell.print(list.name());
    if list.is_empty() {
        shell.print("  (empty)");
    }
    for ingredient in list {
        shell.print(format!("  {}", ingredient));
    }
}

pub(crate) fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_list_args(args: &[&str]) -> Result<ListArgs, clap::Error> {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            list: ListArgs,
        }
        TestCli::try_parse_from(args).map(|cli| cli.list)
    }

    // =========================================================================
    // Subcommand Parsing Tests
    // =========================================================================

    #[test]
    fn test_create_with_items() {
        let args = parse_list_args(&[
            "test", "create", "Grocery", "--item", "Tomato:4", "--item", "Basil",
        ])
        .unwrap();
        match args.command {
            ListCommands::Create { name, items } => {
                assert_eq!(name, "Grocery");
                assert_eq!(items, vec!["Tomato:4", "Basil"]);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_add_with_amount() {
        let args = parse_list_args(&[
            "test", "add", "Grocery", "Tomato", "--amount", "4", "--unit", "count",
        ])
        .unwrap();
        match args.command {
            ListCommands::Add { list, ingredient } => {
                assert_eq!(list, "Grocery");
                assert_eq!(ingredient.ingredient, "Tomato");
                assert_eq!(ingredient.amount.as_deref(), Some("4"));
                assert_eq!(ingredient.unit.as_deref(), Some("count"));
                assert!(!ingredient.custom);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_update_requires_amount() {
        assert!(parse_list_args(&["test", "update", "Grocery", "Tomato"]).is_err());
        assert!(parse_list_args(&["test", "update", "Grocery", "Tomato", "3"]).is_ok());
    }

    #[test]
    fn test_move_requires_both_lists() {
        assert!(parse_list_args(&["test", "move", "Tomato", "--from", "A"]).is_err());

        let args =
            parse_list_args(&["test", "move", "Tomato", "--from", "A", "--to", "B"]).unwrap();
        match args.command {
            ListCommands::Move { from, to, .. } => {
                assert_eq!(from, "A");
                assert_eq!(to, "B");
            }
            _ => panic!("expected move"),
        }
    }

    #[test]
    fn test_rename_args() {
        let args = parse_list_args(&["test", "rename", "Old", "New"]).unwrap();
        assert!(matches!(
            args.command,
            ListCommands::Rename { old_name, new_name } if old_name == "Old" && new_name == "New"
        ));
    }

    #[test]
    fn test_count() {
        assert_eq!(count(0, "ingredient"), "0 ingredients");
        assert_eq!(count(1, "ingredient"), "1 ingredient");
        assert_eq!(count(3, "step"), "3 steps");
    }
}
