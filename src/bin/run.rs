use clap::Parser;
use log::{info, warn};
use recast::{tokenizer::tag::Tagger, Error, Reconstructor, Rules, RulesOptions};
use std::{
    io::{self, Write},
    path::PathBuf,
};

/// Rewrites informal sentences into more formal ones.
#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Text to reconstruct. Ignored if `--input` is given.
    text: Option<String>,
    /// Read the text from this file.
    #[clap(long, short)]
    input: Option<PathBuf>,
    /// Write the result to this file instead of stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
    /// JSON rule set options.
    #[clap(long, short)]
    config: Option<PathBuf>,
    /// Additional lexicon dumps for the tagger.
    #[clap(long)]
    dump: Vec<PathBuf>,
    /// Fail on the first sentence which can not be reconstructed instead of keeping it unchanged.
    #[clap(long)]
    strict: bool,
    /// Print the rules applied to each sentence to stderr.
    #[clap(long)]
    explain: bool,
}

fn run(opts: Opts) -> Result<(), Error> {
    let text = match (&opts.input, opts.text) {
        (Some(path), _) => fs_err::read_to_string(path)?,
        (None, Some(text)) => text,
        (None, None) => {
            return Err(Error::InvalidInput(
                "either a text or --input is required".into(),
            ))
        }
    };

    let options = match &opts.config {
        Some(path) => RulesOptions::from_path(path)?,
        None => RulesOptions::default(),
    };

    let mut tagger = Tagger::english();
    if !opts.dump.is_empty() {
        tagger.extend_from_dumps(&opts.dump[..], &[])?;
    }

    let reconstructor = Reconstructor::new(Rules::new(&options)?, tagger);
    let results = reconstructor.reconstruct_text(&text);
    info!("Reconstructing {} sentences.", results.len());

    let mut outputs = Vec::with_capacity(results.len());
    for (sentence, result) in results {
        match result {
            Ok(reconstruction) => {
                if opts.explain {
                    eprintln!(
                        "{:?} -> {:?} [{}]",
                        sentence,
                        reconstruction.output(),
                        reconstruction.applied().join(", ")
                    );
                }

                outputs.push(reconstruction.into_parts().0);
            }
            Err(error) if opts.strict => return Err(error),
            Err(error) => {
                warn!("keeping {:?} unchanged: {}", sentence, error);
                outputs.push(sentence.to_string());
            }
        }
    }

    let output = outputs.join(" ");
    match &opts.output {
        Some(path) => fs_err::write(path, output + "\n")?,
        None => writeln!(io::stdout().lock(), "{}", output)?,
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    if let Err(error) = run(opts) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
