use std::env;
use std::fs;
use std::process;

use rs_lm_core::model::analysis::{AnalyzedData, analyze};
use rs_lm_core::model::analysis_input::AnalysisInput;
use rs_lm_core::model::corpus::Corpus;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: rs-lm-exemple <training-file> <test-file> <output-file> \
             [-P] [-S] [-G <n>] [--seed <n>] [--json]"
        );
        process::exit(1);
    }

    // Switches mirror the batch driver conventions:
    // -P perplexity, -S smoothing, -G <n> sentence generation
    let mut input = AnalysisInput::default();
    let mut json_dump = false;
    let mut index = 3;
    while index < args.len() {
        match args[index].as_str() {
            "-P" => input.compute_perplexity = true,
            "-S" => input.smoothing = true,
            "-G" => {
                index += 1;
                input.sentences_to_generate =
                    args.get(index).ok_or("-G needs a sentence count")?.parse()?;
            }
            "--seed" => {
                index += 1;
                input.generation_seed =
                    Some(args.get(index).ok_or("--seed needs a value")?.parse()?);
            }
            "--json" => json_dump = true,
            other => return Err(format!("Unknown switch: {}", other).into()),
        }
        index += 1;
    }

    let training = load_corpus(&args[0])?;
    let test = load_corpus(&args[1])?;

    let result = analyze(&training, &test, &input)?;

    // Print the report to the console and store it in the output file.
    let report = format_report(&result);
    print!("{}", report);
    fs::write(&args[2], &report)?;

    if json_dump {
        fs::write(format!("{}.json", args[2]), serde_json::to_string_pretty(&result)?)?;
    }

    Ok(())
}

/// Reads one file into a corpus: one sentence per line, whitespace
/// tokenization. Blank lines are skipped.
fn load_corpus(path: &str) -> Result<Corpus, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let sentences = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(tokenize)
        .collect();
    Ok(Corpus::new(sentences))
}

/// Splits a line on whitespace. A sentence-final "word." is split so the
/// period becomes its own terminal token.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
    let split_period = tokens
        .last()
        .and_then(|last| last.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned);
    if let Some(stem) = split_period {
        tokens.pop();
        tokens.push(stem);
        tokens.push(".".to_owned());
    }
    tokens
}

/// Lays the analysis out section by section: per-sentence probabilities,
/// averages, perplexities, generated sentences.
fn format_report(result: &AnalyzedData) -> String {
    let mut output = String::from("\n");

    let mut number = 1;
    for (sentence, evaluation) in &result.sentences {
        output.push_str(&format!("Sentence {}: {}\n", number, sentence));
        output.push_str(&format!("- unigram [Prob] {}\n", evaluation.unigram_probability));
        output.push_str(&format!("- bigram  [Prob] {}\n\n", evaluation.bigram_probability));
        number += 1;
    }

    output.push_str("==========================\n");
    output.push_str("* Probability:\n");
    output.push_str(&format!(
        "- Average unigram probability: {}\n",
        result.avg_unigram_probability
    ));
    output.push_str(&format!(
        "- Average bigram probability: {}\n",
        result.avg_bigram_probability
    ));

    if let Some(perplexity) = &result.perplexity {
        output.push_str("\n----------\n");
        output.push_str("* Perplexity:\n");
        output.push_str(&format!("- Unigram perplexity: {}\n", perplexity.unigram));
        output.push_str(&format!("- Bigram perplexity:  {}\n", perplexity.bigram));
    }

    if let Some(sentences) = &result.generated_sentences {
        output.push_str("\n------------\n");
        output.push_str("* Randomly Generated Sentences:\n\n");
        for sentence in sentences {
            output.push_str(sentence);
            output.push('\n');
        }
    }

    output
}
