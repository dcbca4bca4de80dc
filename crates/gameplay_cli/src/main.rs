use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use gameplay::{
    run_frames, Direction, FrameParams, GameplayConfig, Health, Inventory, Item, ItemId,
    PlayerController,
};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Drive gameplay behaviors through a fixed-step host loop")]
struct Cli {
    /// TOML file with [health], [inventory] and [player] tunables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Damage, heal, then regenerate a health pool.
    Health(HealthArgs),
    /// Fill and edit an inventory.
    Inventory(InventoryArgs),
    /// Fire player controller input events.
    Controller(ControllerArgs),
}

#[derive(Args)]
struct FrameArgs {
    #[arg(long, default_value_t = 30)]
    frames: u32,
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,
}

impl FrameArgs {
    fn params(&self) -> FrameParams {
        FrameParams {
            fixed_delta: self.dt,
            frames: self.frames,
        }
    }
}

#[derive(Args)]
struct HealthArgs {
    #[command(flatten)]
    frames: FrameArgs,
    #[arg(long)]
    damage: Option<f32>,
    #[arg(long)]
    heal: Option<f32>,
}

#[derive(Args)]
struct InventoryArgs {
    /// Item as ID:NAME or ID:NAME:QTY. Repeatable. A trailing `:N` is read as
    /// the quantity, so a name may contain colons.
    #[arg(long = "item", value_parser = parse_item)]
    items: Vec<Item>,
    /// Item id to remove after adding. Repeatable.
    #[arg(long = "remove")]
    remove: Vec<u32>,
    #[arg(long)]
    no_auto_sort: bool,
    #[arg(long)]
    clear: bool,
}

#[derive(Args)]
struct ControllerArgs {
    #[command(flatten)]
    frames: FrameArgs,
    #[arg(long)]
    jump: bool,
    /// Move direction as X,Y.
    #[arg(long = "move", value_parser = parse_direction)]
    direction: Option<Direction>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .ok();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let report = match cli.command {
        Commands::Health(args) => handle_health(&config, args),
        Commands::Inventory(args) => handle_inventory(&config, args)?,
        Commands::Controller(args) => handle_controller(&config, args),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GameplayConfig> {
    let config = match path {
        Some(path) => {
            let config = GameplayConfig::from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            info!(target: "gameplay_cli", path = %path.display(), "loaded config");
            config.apply_env()
        }
        None => GameplayConfig::from_env(),
    };
    config.validate().context("invalid gameplay config")?;
    Ok(config)
}

fn handle_health(config: &GameplayConfig, args: HealthArgs) -> serde_json::Value {
    let mut health = Health::from_config(&config.health);
    let outcome = args.damage.map(|amount| health.take_damage(amount));
    if let Some(amount) = args.heal {
        health.heal(amount);
    }
    let elapsed = run_frames(&mut [&mut health], args.frames.params());
    json!({
        "timestamp": Utc::now().to_rfc3339(),
        "elapsed": elapsed,
        "damage_outcome": outcome,
        "health": health,
        "dead": health.is_dead(),
    })
}

fn handle_inventory(config: &GameplayConfig, args: InventoryArgs) -> Result<serde_json::Value> {
    let mut inventory = Inventory::from_config(&config.inventory)?;
    if args.no_auto_sort {
        inventory.set_auto_sort(false);
    }
    let added: Vec<_> = args
        .items
        .into_iter()
        .map(|item| {
            let id = item.id;
            let result = inventory.try_add_item(item);
            json!({
                "id": id,
                "added": result.is_ok(),
                "error": result.err().map(|err| err.to_string()),
            })
        })
        .collect();
    let removed: Vec<_> = args
        .remove
        .into_iter()
        .map(|id| json!({ "id": id, "removed": inventory.remove_item(ItemId(id)) }))
        .collect();
    let cleared = args.clear.then(|| inventory.clear_inventory());
    Ok(json!({
        "timestamp": Utc::now().to_rfc3339(),
        "added": added,
        "removed": removed,
        "cleared": cleared,
        "count": inventory.get_item_count(),
        "inventory": inventory,
    }))
}

fn handle_controller(config: &GameplayConfig, args: ControllerArgs) -> serde_json::Value {
    let mut controller = PlayerController::from_config(&config.player);
    if args.jump {
        controller.on_jump();
    }
    if let Some(direction) = args.direction {
        controller.on_move(direction);
    }
    let elapsed = run_frames(&mut [&mut controller], args.frames.params());
    json!({
        "timestamp": Utc::now().to_rfc3339(),
        "elapsed": elapsed,
        "controller": controller,
    })
}

fn parse_item(raw: &str) -> Result<Item> {
    let Some((id, rest)) = raw.split_once(':') else {
        bail!("expected ID:NAME[:QTY], got {raw:?}");
    };
    let id: u32 = id
        .trim()
        .parse()
        .with_context(|| format!("bad item id in {raw:?}"))?;
    let (name, quantity) = match rest.rsplit_once(':') {
        Some((name, qty)) => match qty.trim().parse::<u32>() {
            Ok(qty) => (name, Some(qty)),
            Err(_) => (rest, None),
        },
        None => (rest, None),
    };
    if name.is_empty() {
        bail!("item name is empty in {raw:?}");
    }
    let item = Item::new(id, name);
    Ok(match quantity {
        Some(qty) => item.with_quantity(qty),
        None => item,
    })
}

fn parse_direction(raw: &str) -> Result<Direction> {
    let Some((x, y)) = raw.split_once(',') else {
        bail!("expected X,Y, got {raw:?}");
    };
    Ok(Direction::new(x.trim().parse()?, y.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_item_with_and_without_quantity() {
        let item = parse_item("4:Iron Sword").unwrap();
        assert_eq!(Item::new(4, "Iron Sword"), item);
        assert_eq!(3, parse_item("5:arrow:3").unwrap().quantity);
        assert!(parse_item("sword").is_err());
        assert!(parse_item("x:sword").is_err());
        assert!(parse_item("1:").is_err());
        assert!(parse_item("1::3").is_err());
    }

    #[test]
    fn item_names_may_contain_colons() {
        assert_eq!(Item::new(1, "Key:Gold"), parse_item("1:Key:Gold").unwrap());
        let item = parse_item("2:Map:North:4").unwrap();
        assert_eq!("Map:North", item.name);
        assert_eq!(4, item.quantity);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(&PathBuf::from("no/such/gameplay.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }

    #[test]
    fn parses_direction() {
        assert_eq!(Direction::new(1.0, -0.5), parse_direction("1, -0.5").unwrap());
        assert!(parse_direction("1").is_err());
    }

    #[test]
    fn inventory_report_counts_rejections() {
        let config = GameplayConfig::default();
        let args = InventoryArgs {
            items: vec![Item::new(1, "torch"), Item::new(1, "torch")],
            remove: vec![9],
            no_auto_sort: false,
            clear: false,
        };
        let report = handle_inventory(&config, args).unwrap();
        assert_eq!(1, report["count"]);
        assert_eq!(false, report["added"][1]["added"]);
        assert_eq!(false, report["removed"][0]["removed"]);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
