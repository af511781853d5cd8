use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use redis_map::ConnectionProvider;
use redis_map::RedisConfig;
use redis_map::RedisMap;
use redis_map::RedisProvider;
use redis_map::SledProvider;
use slog::info;
use slog::o;
use slog::Drain;
use slog::Logger;
use slog_async::Async;
use slog_term::CompactFormat;
use slog_term::TermDecorator;
use std::env::current_dir;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::result::Result;

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum EngineName {
    Redis,
    Sled,
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Redis => write!(f, "redis"),
            Self::Sled => write!(f, "sled"),
        }
    }
}

const DEFAULT_MAP: &str = "user2";
const DEFAULT_CONFIG: &str = "application.properties";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the hash holding the map.
    #[arg(long, global = true, default_value = DEFAULT_MAP)]
    map: String,

    /// Storage engine holding the map.
    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "ENGINE-NAME",
        default_value_t = EngineName::Redis
    )]
    engine: EngineName,

    /// Properties file providing redis.host and redis.port. Only read by the redis engine.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Database directory for the sled engine. Defaults to the current directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a few entries, print every view of the map, then clear it.
    Demo,

    /// Print the value of a key, or "Key not found".
    Get { key: String },

    /// Set a key to a value. Prints the value it replaced, if any.
    Put { key: String, value: String },

    /// Remove a key. Prints the value it held, or "Key not found".
    #[command(name = "rm")]
    Remove { key: String },

    /// Print the number of entries.
    Size,

    /// Print every key, one per line.
    Keys,

    /// Print every value, one per line.
    Values,

    /// Print every entry as key=value, one per line.
    Entries,

    /// Delete the whole map.
    Clear,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let decorator = TermDecorator::new().stderr().build();
    let drain = CompactFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).build().fuse();

    let log = slog::Logger::root(drain, o!());

    info!(log, "starting up"; "version" => env!("CARGO_PKG_VERSION"));
    info!(
        log,
        "using configuration";
        "engine" => cli.engine.to_string(), "map" => &cli.map
    );

    match cli.engine {
        EngineName::Redis => {
            let config = RedisConfig::load(&cli.config)?;
            info!(log, "redis server"; "url" => config.url());
            let provider = RedisProvider::new(&config)?;
            run(provider, cli.map, cli.command, log)?;
        }
        EngineName::Sled => {
            let dir = match cli.data_dir {
                Some(dir) => dir,
                None => current_dir()?,
            };
            info!(log, "sled engine"; "directory" => dir.to_str());
            let provider = SledProvider::open(&dir)?;
            run(provider, cli.map, cli.command, log)?;
        }
    };
    Ok(())
}

fn run<P: ConnectionProvider>(
    provider: P,
    name: String,
    command: Commands,
    log: Logger,
) -> Result<(), Box<dyn Error>> {
    let map = RedisMap::new(name, provider).with_logger(log);

    match command {
        Commands::Demo => demo(&map)?,
        Commands::Get { key } => match map.get(&key)? {
            Some(value) => println!("{}", value),
            None => println!("Key not found"),
        },
        Commands::Put { key, value } => {
            if let Some(previous) = map.put(&key, &value)? {
                println!("{}", previous);
            }
        }
        Commands::Remove { key } => match map.remove(&key)? {
            Some(value) => println!("{}", value),
            None => println!("Key not found"),
        },
        Commands::Size => println!("{}", map.size()?),
        Commands::Keys => print_lines(sorted(map.key_set()?)),
        Commands::Values => print_lines(sorted(map.values()?)),
        Commands::Entries => print_lines(entry_lines(&map)?),
        Commands::Clear => map.clear()?,
    }
    Ok(())
}

fn demo<P: ConnectionProvider>(map: &RedisMap<P>) -> redis_map::Result<()> {
    map.put("username", "user")?;
    map.put("password", "password")?;
    map.put("name", "name")?;
    println!("{}", map.get("username")?.unwrap_or_default());
    println!("{:?}", sorted(map.key_set()?));
    println!("{:?}", sorted(map.values()?));
    println!("{:?}", entry_lines(map)?);
    map.clear()
}

fn entry_lines<P: ConnectionProvider>(map: &RedisMap<P>) -> redis_map::Result<Vec<String>> {
    let entries = map.entry_set()?;
    Ok(sorted(
        entries
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value)),
    ))
}

fn sorted(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut items: Vec<String> = items.into_iter().collect();
    items.sort();
    items
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
