use clap::{Parser, Subcommand};
use std::io::Write;
use volley_cli::CliContext;
use volley_cli::commands;
use volley_cli::logging;
use volley_cli::readline;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "volley")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Register {
        #[arg(required = true)]
        specs: Vec<String>,
        #[arg(short, long)]
        group: Option<u32>,
    },
    Update {
        name: String,
        timing: String,
        #[arg(short, long)]
        group: Option<u32>,
    },
    Remove {
        name: String,
    },
    Clear,
    ClearGroup {
        group: u32,
    },
    List,
    Groups,
    Launch {
        #[arg(short, long)]
        group: Option<u32>,
    },
    Preview {
        #[arg(short, long)]
        group: Option<u32>,
    },
    Stop,
    Status,
    Rally {
        #[command(subcommand)]
        command: RallyCommands,
    },
    Config,
    Exit,
}

#[derive(Subcommand)]
enum RallyCommands {
    Add {
        name: String,
        muster: u32,
        march: u32,
        #[arg(short, long)]
        group: Option<u32>,
    },
    Edit {
        name: String,
        muster: u32,
        march: u32,
        #[arg(short, long)]
        group: Option<u32>,
    },
    Remove {
        name: String,
    },
    List,
    Start {
        name: String,
    },
    Preview {
        name: String,
    },
    Announce {
        name: String,
    },
    Save {
        slot: String,
        name: String,
        muster: u32,
        march: u32,
        #[arg(required = true)]
        actors: Vec<String>,
    },
    Presets,
    DeletePreset {
        slot: String,
    },
    Load {
        slot: String,
    },
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "volley".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Register { specs, group }) => commands::register(specs, *group, ctx).await,
        Some(Commands::Update {
            name,
            timing,
            group,
        }) => commands::update(name, timing, *group, ctx).await,
        Some(Commands::Remove { name }) => commands::remove(name, ctx).await,
        Some(Commands::Clear) => commands::clear(ctx).await,
        Some(Commands::ClearGroup { group }) => commands::clear_group(*group, ctx).await,
        Some(Commands::List) => commands::list(ctx).await,
        Some(Commands::Groups) => commands::groups(ctx).await,
        Some(Commands::Launch { group }) => commands::launch(*group, ctx).await,
        Some(Commands::Preview { group }) => commands::preview(*group, ctx).await,
        Some(Commands::Stop) => commands::stop(ctx).await,
        Some(Commands::Status) => commands::status(ctx).await,
        Some(Commands::Rally { command }) => respond_rally(command, ctx).await,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

async fn respond_rally(command: &RallyCommands, ctx: &CliContext) {
    match command {
        RallyCommands::Add {
            name,
            muster,
            march,
            group,
        } => commands::rally_add(name, *muster, *march, *group, ctx).await,
        RallyCommands::Edit {
            name,
            muster,
            march,
            group,
        } => commands::rally_edit(name, *muster, *march, *group, ctx).await,
        RallyCommands::Remove { name } => commands::rally_remove(name, ctx).await,
        RallyCommands::List => commands::rally_list(ctx).await,
        RallyCommands::Start { name } => commands::rally_start(name, ctx).await,
        RallyCommands::Preview { name } => commands::rally_preview(name, ctx).await,
        RallyCommands::Announce { name } => commands::rally_announce(name, ctx).await,
        RallyCommands::Save {
            slot,
            name,
            muster,
            march,
            actors,
        } => commands::rally_save(slot, name, *muster, *march, actors, ctx).await,
        RallyCommands::Presets => commands::rally_presets(ctx).await,
        RallyCommands::DeletePreset { slot } => commands::rally_delete_preset(slot, ctx).await,
        RallyCommands::Load { slot } => commands::rally_load(slot, ctx).await,
    }
}
