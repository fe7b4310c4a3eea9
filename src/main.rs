use anyhow::Result;
use clap::Parser;

use social_forest_analyzer::community::{detection, metrics};
use social_forest_analyzer::config::Config;
use social_forest_analyzer::data;
use social_forest_analyzer::sentiment::{Lexicon, SentimentAnalyzer};
use social_forest_analyzer::{storage, traversal, viz};

#[derive(Parser, Debug)]
#[clap(
    name = "social-forest-analyzer",
    about = "Hierarchy, community, centrality and sentiment analysis of a social forest"
)]
struct Cli {
    /// Path to a JSON network description (the built-in sample is used if omitted)
    #[clap(long)]
    input: Option<String>,

    /// Path to a JSON lexicon replacing the built-in word lists
    #[clap(long)]
    lexicon: Option<String>,

    /// Output directory for JSON results (nothing is written if omitted)
    #[clap(long)]
    output_dir: Option<String>,

    /// Reject duplicate ids, unknown parents and unknown senders
    #[clap(long)]
    strict: bool,

    /// Spaces per level in the tree rendering
    #[clap(long, default_value = "2")]
    indent: usize,

    /// Minimum community size kept in the JSON results
    #[clap(long, default_value = "1")]
    min_community_size: usize,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(
        args.indent,
        args.strict,
        args.min_community_size,
        Config::default().parallel_threshold,
    );

    // 1. Build the forest
    let forest = match &args.input {
        Some(path) => data::json::load_forest(path, &config)?,
        None => {
            log::info!("No input given, using the sample network");
            data::sample::sample_forest()
        }
    };

    let lexicon = match &args.lexicon {
        Some(path) => Lexicon::from_json_file(path)?,
        None => Lexicon::default(),
    };
    let analyzer = SentimentAnalyzer::with_config(lexicon, &config);

    // 2. Analyse
    let tree = traversal::render(&forest);
    let communities = detection::find_communities(&forest);
    let centrality = metrics::degree_centrality(&forest);
    let report = analyzer.analyze(&forest);

    // 3. Present
    println!("\nSocial network tree:");
    println!("{}", viz::format_tree(&tree, config.indent_width));

    println!("\nCommunities: {}", viz::format_communities(&communities));

    println!("\nDegree centrality: {}", viz::format_centrality(&centrality));

    println!("\nInteraction sentiment:");
    println!("{}", viz::format_sentiments(&forest, &report));

    // 4. Save results if requested
    if let Some(output_dir) = &args.output_dir {
        let detected = detection::detect(&forest, &config);
        storage::save_results(&forest, &detected, &centrality, &report, output_dir)?;

        if !args.skip_viz {
            viz::generate_visualizations(&forest, &detected, output_dir)?;
        }

        log::info!("Analysis complete. Results saved to {}", output_dir);
    }

    Ok(())
}
