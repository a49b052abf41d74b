//! Command implementations

pub mod auth;
pub mod catalog;
pub mod completions;
pub mod lists;
pub mod recipes;

use anyhow::{bail, Result};

use crate::cli::IngredientArgs;
use crate::GlobalOptions;
use cupboard::ops::IngredientForm;
use cupboard::session::{create_session, Session};

/// Build the session for this invocation from the merged config.
pub fn open_session(global_opts: &GlobalOptions) -> Result<Session> {
    let config = global_opts.ctx.load_config();
    create_session(&config, &global_opts.ctx)
}

/// Like [`open_session`], failing unless someone is signed in.
pub fn signed_in_session(global_opts: &GlobalOptions) -> Result<Session> {
    let session = open_session(global_opts)?;
    if !session.is_authenticated() {
        bail!("not logged in\nhint: run `cupboard login` first");
    }
    Ok(session)
}

impl From<IngredientArgs> for IngredientForm {
    fn from(args: IngredientArgs) -> Self {
        IngredientForm {
            name: args.ingredient,
            category: args.category,
            amount: args.amount,
            unit: args.unit,
            custom: args.custom,
        }
    }
}

/// Parse `NAME[:AMOUNT[:UNIT]]`.
pub fn parse_item(item: &str) -> IngredientForm {
    let mut parts = item.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    IngredientForm {
        amount: parts.next().map(str::to_string),
        unit: parts.next().map(str::to_string),
        ..IngredientForm::new(name)
    }
}
