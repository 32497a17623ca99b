//! kucharka-ui - terminal front end for the recipe list
//!
//! Each invocation mounts the recipe controller against a running
//! kucharka-server, performs one action and prints the resulting page and
//! any queued alerts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kucharka_common::config::TomlConfig;
use kucharka_common::{Recipe, RecipeDraft, RecipeIngredient};
use kucharka_ui::http::DEFAULT_SERVER_URL;
use kucharka_ui::{AlertQueue, HttpCalls, Identity, Priority, RecipeController, TEXT_FILTER};

/// Command-line arguments for kucharka-ui
#[derive(Parser, Debug)]
#[command(name = "kucharka-ui")]
#[command(about = "Browse and edit Kuchařka recipes")]
#[command(version)]
struct Args {
    /// Server base URL [default: http://127.0.0.1:5780]
    #[arg(long, env = "KUCHARKA_SERVER_URL")]
    server_url: Option<String>,

    /// Identity sent with every change
    #[arg(long, env = "KUCHARKA_USER_ID", default_value = "0-0")]
    user_id: String,

    #[arg(long, env = "KUCHARKA_USER_NAME", default_value = "Anonym")]
    user_name: String,

    /// Authority granted to the user (repeatable)
    #[arg(long = "authority")]
    authorities: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of recipes
    List {
        /// Filter on name and description
        #[arg(short, long, default_value = "")]
        text: String,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one recipe with its ingredients and steps
    Show { id: String },
    /// Create a recipe
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Ingredient as `id[:amount[:unit]]` (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// Preparation step (repeatable, in order)
        #[arg(short, long = "step")]
        steps: Vec<String>,
    },
    /// Delete a recipe
    Delete { id: String },
    /// List known ingredients
    Ingredients,
    /// Add an ingredient to the shared list
    AddIngredient { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                toml.log_level
                    .clone()
                    .unwrap_or_else(|| "kucharka_ui=warn".to_string())
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let server_url = args
        .server_url
        .clone()
        .or(toml.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let alerts = AlertQueue::new();
    let calls = HttpCalls::new(server_url, alerts.clone());
    let identity = Identity::new(args.user_id.clone(), args.user_name.clone()).with_authorities(args.authorities.clone());
    let mut controller = RecipeController::new(calls, identity);

    let outcome = run(&mut controller, args.command).await;
    print_alerts(&alerts);
    outcome
}

async fn run(controller: &mut RecipeController<HttpCalls>, command: Command) -> Result<()> {
    match command {
        Command::List { text, page } => {
            controller.mount().await;
            if !text.is_empty() || page != 1 {
                controller.handle_change(TEXT_FILTER, text);
                controller.search(page).await;
            }
            print_page(controller);
        }
        Command::Show { id } => {
            controller.reload_ingredients().await;
            let recipe = controller
                .calls()
                .get_recipe(&id)
                .await
                .with_context(|| format!("Recipe {} not available", id))?;
            controller.show_detail(recipe);
            if let Some(recipe) = controller.modals().detail.as_ref() {
                print_detail(controller, recipe);
            }
            controller.close_detail();
        }
        Command::Create {
            name,
            description,
            ingredients,
            steps,
        } => {
            controller.mount().await;
            let draft = RecipeDraft {
                name,
                description,
                ingredients: ingredients
                    .iter()
                    .map(|arg| parse_ingredient(arg))
                    .collect::<Result<_>>()?,
                steps,
            };
            controller.show_create();
            let recipe = controller.submit_create(draft).await?;
            println!("{}", recipe.id);
            print_page(controller);
        }
        Command::Delete { id } => {
            controller.mount().await;
            let recipe = controller
                .calls()
                .get_recipe(&id)
                .await
                .with_context(|| format!("Recipe {} not available", id))?;
            controller.show_delete(recipe.clone());
            controller.submit_delete(&recipe).await?;
            print_page(controller);
        }
        Command::Ingredients => {
            controller.reload_ingredients().await;
            for ingredient in controller.ingredients() {
                println!("{}  {}", ingredient.id, ingredient.name);
            }
        }
        Command::AddIngredient { name } => {
            let ingredient = controller.create_ingredient(&name).await?;
            println!("{}", ingredient.id);
        }
    }
    Ok(())
}

/// `id[:amount[:unit]]`
fn parse_ingredient(arg: &str) -> Result<RecipeIngredient> {
    let mut parts = arg.splitn(3, ':');
    let id = parts.next().unwrap_or_default().trim();
    if id.is_empty() {
        bail!("Ingredient without id: {:?}", arg);
    }
    let amount = match parts.next().map(str::trim).filter(|s| !s.is_empty()) {
        Some(amount) => Some(
            amount
                .replace(',', ".")
                .parse::<f64>()
                .with_context(|| format!("Invalid amount in {:?}", arg))?,
        ),
        None => None,
    };
    let unit = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(RecipeIngredient::new(id, amount, unit))
}

fn print_page(controller: &RecipeController<HttpCalls>) {
    let Some(page) = controller.recipe_page() else {
        return;
    };
    for recipe in &page.item_list {
        println!("{}  {}", recipe.id, recipe.name);
    }
    let info = page.page_info;
    println!(
        "-- page {}/{} ({} recipes)",
        info.page_number,
        info.total_pages.max(1),
        info.total
    );
}

fn print_detail(controller: &RecipeController<HttpCalls>, recipe: &Recipe) {
    println!("{}", recipe.name);
    if let Some(description) = recipe.description.as_deref() {
        println!("\n{}", description);
    }
    if !recipe.ingredients.is_empty() {
        println!();
        for item in &recipe.ingredients {
            let name = controller.ingredient_name(&item.id).unwrap_or(&item.id);
            let amount = item
                .amount
                .as_ref()
                .map(ToString::to_string)
                .or_else(|| {
                    item.raw_amount()
                        .map(|raw| raw.as_str().map(str::to_string).unwrap_or_else(|| raw.to_string()))
                });
            match (amount, item.unit.as_deref()) {
                (Some(amount), Some(unit)) => println!("  - {} {} {}", amount, unit, name),
                (Some(amount), None) => println!("  - {} {}", amount, name),
                _ => println!("  - {}", name),
            }
        }
    }
    for (i, step) in recipe.steps.iter().enumerate() {
        if i == 0 {
            println!();
        }
        println!("  {}. {}", i + 1, step);
    }
}

fn print_alerts(alerts: &AlertQueue) {
    for alert in alerts.drain() {
        let header = alert.header.as_deref().unwrap_or(match alert.priority {
            Priority::Error => "Chyba",
            _ => "OK",
        });
        eprintln!("[{}] {}", header, alert.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient_full() {
        let item = parse_ingredient("abc:1,5:kg").unwrap();
        assert_eq!(item.id, "abc");
        assert_eq!(item.amount_value(), Some(1.5));
        assert_eq!(item.unit.as_deref(), Some("kg"));
    }

    #[test]
    fn test_parse_ingredient_id_only() {
        let item = parse_ingredient("abc").unwrap();
        assert_eq!(item.amount, None);
        assert_eq!(item.unit, None);
    }

    #[test]
    fn test_parse_ingredient_rejects_bad_input() {
        assert!(parse_ingredient(":2:ks").is_err());
        assert!(parse_ingredient("abc:lots").is_err());
    }
}
