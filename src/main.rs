use clap::Parser;
use prompt_bingo::array;
use prompt_bingo::board::{self, BoardLayout};
use prompt_bingo::board_renderer;
use prompt_bingo::prompts::{self, ParticipantPromptPool};
use prompt_bingo::seed::{self, SeedContext, USER_SEED_RANGE};
use prompt_bingo::{BingoError, Cell, generate_prompts};
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "prompt-bingo")]
#[command(about = "Generate a shared bingo board from participant prompts")]
struct Args {
    /// JSON file with participant prompt pools
    #[arg(long, default_value = "prompts.json")]
    prompts: String,

    /// Route inside the prompts document (e.g. /streamer/big); without it the
    /// file must hold a top-level "participants" list
    #[arg(long)]
    route: Option<String>,

    #[arg(long, value_enum, default_value_t = BoardLayout::Small)]
    size: BoardLayout,

    /// Explicit shuffle seed; derived from today's seed phrase when omitted
    #[arg(long)]
    seed: Option<i64>,

    /// Board name mixed into the seed phrase
    #[arg(long, default_value = "bingo")]
    name: String,

    /// Board version mixed into the seed phrase
    #[arg(long, default_value_t = 1)]
    version_tag: u32,

    /// Per-user random seed; drawn fresh when omitted
    #[arg(long)]
    user_seed: Option<i64>,

    #[arg(long, default_value = "bingo_board.png")]
    output: String,

    #[arg(short, long)]
    verbose: bool,
}

fn load_pools(args: &Args) -> Result<Vec<ParticipantPromptPool>, BingoError> {
    match &args.route {
        Some(route) => prompts::pools_at_route(&prompts::read_prompt_document(&args.prompts)?, route),
        None => prompts::read_prompt_pools_from_json(&args.prompts),
    }
}

fn resolve_seed(args: &Args) -> i64 {
    if let Some(seed) = args.seed {
        return seed;
    }
    let user_seed = args.user_seed.unwrap_or_else(|| {
        seed::random_int(&mut rand::rng(), *USER_SEED_RANGE.start(), *USER_SEED_RANGE.end(), None)
    });
    let mut ctx = SeedContext::now(args.version_tag, args.name.clone(), user_seed);
    ctx.timezone = std::env::var("TZ").unwrap_or_default();
    ctx.languages = std::env::var("LANG").map(|l| vec![l]).unwrap_or_default();

    let phrase = seed::generate_seed_phrase(&ctx);
    debug!("Seed phrase - {phrase}");
    seed::seed_from_phrase(&phrase)
}

fn run(args: &Args) -> Result<(), BingoError> {
    let pools = load_pools(args)?;
    info!("Loaded {} participants from {}", pools.len(), args.prompts);

    let seed = resolve_seed(args);
    info!("Using seed {seed}");

    let prompts = generate_prompts(&pools, seed, args.size.cells())?;
    let cells = board::assemble(args.size, prompts)?;
    let free = cells.iter().filter(|c| **c == Cell::Free).count();
    debug!("Board has {} cells, {free} free", cells.len());
    for row in array::chunk(&cells, args.size.side()) {
        let labels: Vec<&str> = row
            .iter()
            .map(|cell| match cell {
                Cell::Prompt(p) => p.id.as_str(),
                Cell::Free => "*",
            })
            .collect();
        debug!("  {}", labels.join(" "));
    }

    board_renderer::render_board_to_png(&cells, args.size, &args.output)?;
    info!("Bingo board image written to {}", args.output);
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    if let Err(e) = run(&args) {
        error!("Failed to build bingo board: {e}");
        std::process::exit(1);
    }
}
