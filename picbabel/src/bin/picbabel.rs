use clap::{Arg, Command};
use picbabel::{DeepLProvider, FieldSet, MockMode, MockProvider, Reconciler, TranslationProvider};
use std::collections::HashSet;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("picbabel")
        .version("0.1.0")
        .about("Batch translation of image metadata fields")
        .arg(
            Arg::new("target-lang")
                .help("Target language code (e.g., DE, FR, ES)")
                .required_unless_present("languages")
                .index(1),
        )
        .arg(
            Arg::new("fields")
                .help("Fields to translate, as name=text pairs")
                .num_args(0..)
                .index(2),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .short('l')
                .help("Treat the named field as a comma-joined list (repeatable)")
                .action(clap::ArgAction::Append),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock provider instead of DeepL")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("languages")
                .long("languages")
                .help("List the provider's target languages and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show the flattened batch before translating")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    let provider: Arc<dyn TranslationProvider> = if use_mock {
        Arc::new(MockProvider::new(MockMode::Prefix))
    } else {
        if env::var("DEEPL_API_KEY").is_err() {
            eprintln!("❌ DEEPL_API_KEY environment variable not set");
            eprintln!("   Set it with: export DEEPL_API_KEY=your_api_key");
            eprintln!("   Or use --mock to use the mock provider");
            return Err("Missing API key".into());
        }
        Arc::new(DeepLProvider::from_env()?)
    };
    let reconciler = Reconciler::new(provider);

    if matches.get_flag("languages") {
        let languages = reconciler.list_target_languages().await?;
        for lang in languages {
            println!("{:<8} {}", lang.language, lang.name);
        }
        return Ok(());
    }

    let target_lang = matches.get_one::<String>("target-lang").unwrap();

    let mut fields = FieldSet::new();
    if let Some(pairs) = matches.get_many::<String>("fields") {
        for pair in pairs {
            match pair.split_once('=') {
                Some((name, text)) => fields.insert(name, text),
                None => {
                    eprintln!("❌ Invalid field argument '{}', expected name=text", pair);
                    return Err("Invalid field argument".into());
                }
            }
        }
    }
    if fields.is_empty() {
        eprintln!("❌ No fields given, expected name=text pairs");
        return Err("No fields".into());
    }

    let list_fields: HashSet<String> = matches
        .get_many::<String>("list")
        .map(|names| names.cloned().collect())
        .unwrap_or_default();

    if verbose {
        println!("🌍 Target: {}", target_lang);
        println!("🔌 Provider: {}", reconciler.provider_name());
        let units = picbabel::flatten(&fields, &list_fields);
        println!("📦 Batch of {} unit(s):", units.len());
        for (i, unit) in units.iter().enumerate() {
            match unit.element_index {
                Some(pos) => println!("   [{}] {}[{}] = \"{}\"", i, unit.field, pos, unit.text),
                None => println!("   [{}] {} = \"{}\"", i, unit.field, unit.text),
            }
        }
        println!();
    }

    let translated = reconciler.translate(&fields, &list_fields, target_lang).await?;
    println!("{}", serde_json::to_string_pretty(&translated)?);

    Ok(())
}
