//! puter: command-line front end for the Puter AI client
//!
//! Usage:
//!   puter chat <prompt>                              Plain chat completion
//!   puter research <topic> [--depth d] [--sources]   Web-search research
//!   puter batch <topic> <topic> ...                  Research several topics in one request
//!   puter blog <topic> [--tone t] [--length l]       Draft a markdown blog post

use anyhow::{bail, Context};
use puter_ai::skills::{BatchResearchOptions, BlogOptions, Depth, ResearchOptions};
use puter_ai::{ChatOptions, ClientConfig, PuterClient, ResearchSkill, Task};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().cloned() else {
        print_usage();
        std::process::exit(1);
    };

    match command.as_str() {
        "version" | "--version" | "-V" => {
            println!("puter {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let mut parsed = ParsedArgs::parse(&args[1..])?;
    let config = load_config(parsed.take_value("--config"))?;
    let client = PuterClient::new(config).context("failed to build client")?;
    let skill = ResearchSkill::new(client);

    let model = parsed.take_value("--model");
    let chat = match model {
        Some(m) => ChatOptions::new().model(m),
        None => ChatOptions::new(),
    };
    let show_report = parsed.take_flag("--report");

    let task = match command.as_str() {
        "chat" => Task::Chat(parsed.joined_positional("prompt")?, chat),
        "research" => {
            let depth = match parsed.take_value("--depth") {
                Some(d) => d.parse::<Depth>()?,
                None => Depth::Medium,
            };
            let opts = ResearchOptions::new()
                .depth(depth)
                .include_sources(parsed.take_flag("--sources"))
                .chat(chat);
            Task::Research(parsed.joined_positional("topic")?, opts)
        }
        "batch" => {
            if parsed.positional.is_empty() {
                bail!("batch needs at least one topic");
            }
            let topics = std::mem::take(&mut parsed.positional);
            Task::BatchResearch(topics, BatchResearchOptions::new().chat(chat))
        }
        "blog" => {
            let mut opts = BlogOptions::new().chat(chat);
            if let Some(tone) = parsed.take_value("--tone") {
                opts = opts.tone(tone);
            }
            if let Some(length) = parsed.take_value("--length") {
                opts = opts.length(length);
            }
            while let Some(k) = parsed.take_value("--keyword") {
                opts = opts.keyword(k);
            }
            opts = opts.include_research(!parsed.take_flag("--no-research"));
            Task::DraftBlog(parsed.joined_positional("topic")?, opts)
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    parsed.reject_unknown()?;

    let output = skill.execute(task).await?;
    println!("{output}");

    if show_report {
        eprintln!();
        eprintln!("{}", skill.optimization_report());
    }
    Ok(())
}

fn print_usage() {
    println!(
        r#"puter: Puter AI command-line client

USAGE:
    puter <COMMAND> [OPTIONS]

COMMANDS:
    chat <prompt>                    Plain chat completion
    research <topic>                 Research a topic with web search
        --depth <quick|medium|deep>
        --sources                    Ask for citations
    batch <topic> <topic> ...        Research several topics in one request
    blog <topic>                     Draft a markdown blog post
        --tone <tone>                Default: professional
        --length <length>            Default: "1500 words"
        --keyword <kw>               Repeatable
        --no-research                Skip the research pass
    version                          Show version information
    help                             Show this help message

GLOBAL OPTIONS:
    --config <path>                  YAML config file
    --model <model>                  Override the model for this call
    --report                         Print the cost optimization report

ENVIRONMENT:
    PUTER_AUTH_TOKEN                 Bearer token
    PUTER_API_BASE                   API base URL
    PUTER_DEFAULT_MODEL              Default model
    RUST_LOG                         Log filter (default: info)"#
    );
}

fn load_config(path: Option<String>) -> anyhow::Result<ClientConfig> {
    let base = match path {
        Some(p) => ClientConfig::from_yaml_file(&p)
            .with_context(|| format!("failed to load config from {p}"))?,
        None => ClientConfig::default(),
    };
    Ok(base.apply_env()?)
}

/// Arguments after the command, split into `--flag [value]` options and positionals.
struct ParsedArgs {
    options: Vec<(String, Option<String>)>,
    positional: Vec<String>,
}

const VALUE_FLAGS: &[&str] = &["--config", "--model", "--depth", "--tone", "--length", "--keyword"];

impl ParsedArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut options = Vec::new();
        let mut positional = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if VALUE_FLAGS.contains(&arg.as_str()) {
                let value = iter
                    .next()
                    .with_context(|| format!("{arg} expects a value"))?;
                options.push((arg.clone(), Some(value.clone())));
            } else if arg.starts_with("--") {
                options.push((arg.clone(), None));
            } else {
                positional.push(arg.clone());
            }
        }
        Ok(Self {
            options,
            positional,
        })
    }

    fn take_value(&mut self, flag: &str) -> Option<String> {
        let idx = self
            .options
            .iter()
            .position(|(name, value)| name == flag && value.is_some())?;
        self.options.remove(idx).1
    }

    fn take_flag(&mut self, flag: &str) -> bool {
        match self
            .options
            .iter()
            .position(|(name, value)| name == flag && value.is_none())
        {
            Some(idx) => {
                self.options.remove(idx);
                true
            }
            None => false,
        }
    }

    fn joined_positional(&mut self, what: &str) -> anyhow::Result<String> {
        if self.positional.is_empty() {
            bail!("missing {what}");
        }
        Ok(std::mem::take(&mut self.positional).join(" "))
    }

    fn reject_unknown(&self) -> anyhow::Result<()> {
        if let Some((name, _)) = self.options.first() {
            bail!("unknown or unsupported option: {name}");
        }
        Ok(())
    }
}
