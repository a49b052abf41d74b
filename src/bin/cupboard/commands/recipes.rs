//! `cupboard recipes` and `cupboard recipe ...` commands

use anyhow::{bail, Result};

use crate::cli::{RecipeArgs, RecipeCommands};
use crate::commands::lists::count;
use crate::commands::{parse_item, signed_in_session};
use crate::GlobalOptions;
use cupboard::core::Recipe;
use cupboard::ops::{recipes, IngredientForm};
use cupboard::util::{Shell, Status};

pub fn show_all(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let session = signed_in_session(global_opts)?;

    shell.json_data("recipes", session.recipes());
    if session.recipes().is_empty() {
        shell.note("no recipes yet; create one with `cupboard recipe create <NAME>`");
    }
    for recipe in session.recipes() {
        shell.print(format!(
            "{} ({}, {})",
            recipe.name,
            count(recipe.ingredients.len(), "ingredient"),
            count(recipe.steps.len(), "step")
        ));
    }
    Ok(())
}

pub fn execute(args: RecipeArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut session = signed_in_session(global_opts)?;

    match args.command {
        RecipeCommands::Show { name } => match session.recipe(name.trim()) {
            Some(recipe) => print_recipe(shell, recipe),
            None => bail!("recipe '{}' not found", name.trim()),
        },
        RecipeCommands::Create { name, items, steps } => {
            let ingredients: Vec<IngredientForm> = items.iter().map(|i| parse_item(i)).collect();
            let name = recipes::create_recipe(&mut session, &name, &ingredients, &steps)?;
            shell.status(Status::Created, format!("recipe {}", name));
        }
        RecipeCommands::Delete { name } => {
            recipes::delete_recipe(&mut session, &name)?;
            shell.status(Status::Deleted, format!("recipe {}", name.trim()));
        }
        RecipeCommands::Add { recipe, ingredient } => {
            let added = recipes::add_ingredient(&mut session, &recipe, &ingredient.into())?;
            shell.status(Status::Added, format!("{} to {}", added, recipe.trim()));
        }
        RecipeCommands::Remove {
            recipe,
            ingredient,
            custom,
        } => {
            let removed = recipes::remove_ingredient(&mut session, &recipe, &ingredient, custom)?;
            shell.status(Status::Removed, format!("{} from {}", removed.name, recipe.trim()));
        }
        RecipeCommands::StepAdd { recipe, text } => {
            let number = recipes::add_step(&mut session, &recipe, &text)?;
            shell.status(Status::Added, format!("step {} to {}", number, recipe.trim()));
        }
        RecipeCommands::StepDelete { recipe, index } => {
            let removed = recipes::delete_step(&mut session, &recipe, index)?;
            shell.status(
                Status::Deleted,
                format!("step {} of {}: {}", index, recipe.trim(), removed),
            );
        }
        RecipeCommands::StepUpdate {
            recipe,
            index,
            text,
        } => {
            recipes::update_step(&mut session, &recipe, index, &text)?;
            shell.status(Status::Updated, format!("step {} of {}", index, recipe.trim()));
        }
    }
    Ok(())
}

fn print_recipe(shell: &Shell, recipe: &Recipe) {
    shell.json_data("recipe", recipe);
    shell.print(&recipe.name);

    shell.print("Ingredients:");
    if recipe.ingredients.is_empty() {
        shell.print("  (none)");
    }
    for ingredient in &recipe.ingredients {
        shell.print(format!("  {}", ingredient));
    }

    shell.print("Steps:");
    if recipe.steps.is_empty() {
        shell.print("  (none)");
    }
    for (number, step) in recipe.numbered_steps() {
        shell.print(format!("  {}. {}", number, step));
    }
}
