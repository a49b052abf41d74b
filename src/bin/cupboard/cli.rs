//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

use cupboard::util::ColorChoice;

/// Cupboard - grocery lists and recipes
#[derive(Parser)]
#[command(name = "cupboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors and requested listings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in
    Login(LoginArgs),

    /// Sign out and forget stored credentials
    Logout,

    /// Show who is signed in and which backend is in use
    Whoami,

    /// Browse the ingredient catalog
    Catalog(CatalogArgs),

    /// Show all lists
    Lists,

    /// Work with a single list
    List(ListArgs),

    /// Manage custom ingredients
    Custom(CustomArgs),

    /// Show all recipes
    Recipes,

    /// Work with a single recipe
    Recipe(RecipeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Access token obtained from the identity provider
    #[arg(long)]
    pub token: Option<String>,

    /// Refresh token to renew the access token with
    #[arg(long, requires = "token")]
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds
    #[arg(long, requires = "token")]
    pub expires_in: Option<u64>,

    /// Email address of the signed-in user
    #[arg(long, requires = "token")]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Only show ingredients whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// List the measurement units instead
    #[arg(long, conflicts_with = "search")]
    pub units: bool,
}

/// An ingredient reference plus an optional amount.
#[derive(Args, Debug, Clone)]
pub struct IngredientArgs {
    /// Ingredient name
    pub ingredient: String,

    /// Amount to add
    #[arg(short, long)]
    pub amount: Option<String>,

    /// Unit of the amount: mg, kg, g, ml, count
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Category, for ingredients not in the catalog
    #[arg(long)]
    pub category: Option<String>,

    /// Refer to your custom ingredient of this name
    #[arg(long)]
    pub custom: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommands,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Show the ingredients of a list
    Show { name: String },

    /// Create a new list
    Create {
        name: String,

        /// Seed ingredient as NAME[:AMOUNT[:UNIT]] (repeatable)
        #[arg(long = "item", value_name = "ITEM")]
        items: Vec<String>,
    },

    /// Delete a list
    Delete { name: String },

    /// Rename a list
    Rename { old_name: String, new_name: String },

    /// Add an ingredient, merging with an existing entry
    Add {
        list: String,

        #[command(flatten)]
        ingredient: IngredientArgs,
    },

    /// Remove an ingredient
    Remove {
        list: String,
        ingredient: String,

        #[arg(long)]
        custom: bool,
    },

    /// Set the amount of an ingredient already in the list
    Update {
        list: String,
        ingredient: String,
        amount: String,

        #[arg(short, long)]
        unit: Option<String>,

        #[arg(long)]
        custom: bool,
    },

    /// Move an ingredient to another list
    Move {
        ingredient: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        custom: bool,
    },
}

#[derive(Args)]
pub struct CustomArgs {
    #[command(subcommand)]
    pub command: CustomCommands,
}

#[derive(Subcommand)]
pub enum CustomCommands {
    /// Add an ingredient to your catalog
    Add {
        name: String,

        #[arg(short, long)]
        category: String,
    },

    /// Remove one of your custom ingredients
    Remove { name: String },
}

#[derive(Args)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommands,
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Show a recipe's ingredients and steps
    Show { name: String },

    /// Create a new recipe
    Create {
        name: String,

        /// Ingredient as NAME[:AMOUNT[:UNIT]] (repeatable)
        #[arg(long = "item", value_name = "ITEM")]
        items: Vec<String>,

        /// Step text (repeatable, in order)
        #[arg(long = "step", value_name = "TEXT")]
        steps: Vec<String>,
    },

    /// Delete a recipe
    Delete { name: String },

    /// Add an ingredient to a recipe
    Add {
        recipe: String,

        #[command(flatten)]
        ingredient: IngredientArgs,
    },

    /// Remove an ingredient from a recipe
    Remove {
        recipe: String,
        ingredient: String,

        #[arg(long)]
        custom: bool,
    },

    /// Append a step
    StepAdd { recipe: String, text: String },

    /// Delete the step at a 1-based position
    StepDelete { recipe: String, index: usize },

    /// Replace the step at a 1-based position
    StepUpdate {
        recipe: String,
        index: usize,
        text: String,
    },
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
