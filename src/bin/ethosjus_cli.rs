//! EthosJus CLI
//!
//! Commands: questions, ask, history, links, contract, export
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 when there is nothing to export

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use base64::Engine;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::Level;

use ethosjus_core::{
    guidance::{self, OFFICIAL_LINKS},
    AppConfig, ContractFields, DocxDownload, ExportError, ExportPipeline, ExportRequest,
    HistoryStore, JsonlHistory, ENGINE_VERSION, QUICK_QUESTIONS,
};

#[derive(Parser)]
#[command(name = "ethosjus-cli")]
#[command(about = "EthosJus CLI - OAB ethics guidance and contract generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the Q&A history
    #[arg(short, long, env = "ETHOSJUS_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Default number of history entries to show
    #[arg(long, env = "ETHOSJUS_HISTORY_LIMIT", default_value_t = 50)]
    history_limit: usize,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the quick questions
    Questions,

    /// Answer a question and record it in the history
    Ask {
        question: String,
    },

    /// Show recent questions, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List official OAB references
    Links,

    /// Assemble the services contract
    Contract {
        /// JSON object of contract fields
        #[arg(short, long)]
        payload: Option<String>,

        /// Also write a .docx into this directory
        #[arg(long)]
        docx: Option<PathBuf>,

        /// Download filename (without extension)
        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Export free-form text as .docx
    Export {
        /// File containing the text to export
        #[arg(long)]
        text_file: PathBuf,

        #[arg(short, long)]
        title: Option<String>,

        /// Download filename (without extension); defaults to the title
        #[arg(short, long)]
        filename: Option<String>,

        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Include the file as base64 in the output
        #[arg(long)]
        inline: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();
    tracing::debug!("ethosjus-cli v{}", ENGINE_VERSION);

    let config = AppConfig::new(&cli.data_dir).with_history_limit(cli.history_limit);
    let pipeline = ExportPipeline::new();

    match cli.command {
        Commands::Questions => {
            print_json(&json!(QUICK_QUESTIONS));
            ExitCode::SUCCESS
        }

        Commands::Links => {
            print_json(&json!(OFFICIAL_LINKS));
            ExitCode::SUCCESS
        }

        Commands::Ask { question } => {
            let question = question.trim();
            if question.is_empty() {
                print_json(&json!({"ok": false, "error": "missing question"}));
                return ExitCode::FAILURE;
            }

            let answer = guidance::answer_for(question);
            let recorded = JsonlHistory::open(config.history_path())
                .and_then(|mut history| history.record(question, &answer, Utc::now()));
            if let Err(e) = recorded {
                print_json(&json!({"ok": false, "error": e.to_string()}));
                return ExitCode::FAILURE;
            }

            print_json(&json!({"ok": true, "question": question, "answer_html": answer}));
            ExitCode::SUCCESS
        }

        Commands::History { limit } => {
            let limit = limit.unwrap_or(config.history_limit);
            let entries = JsonlHistory::open(config.history_path())
                .and_then(|history| history.recent(limit));
            match entries {
                Ok(entries) => {
                    let rows: Vec<_> = entries
                        .iter()
                        .map(|e| {
                            json!({
                                "id": e.id,
                                "question": e.question,
                                "answer_html": e.answer,
                                "created_at": e.display_timestamp(),
                            })
                        })
                        .collect();
                    print_json(&json!({"app": config.app_name, "history": rows}));
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    print_json(&json!({"ok": false, "error": e.to_string()}));
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Contract { payload, docx, filename } => {
            let fields: ContractFields = match payload.as_deref().map(serde_json::from_str) {
                None => ContractFields::default(),
                Some(Ok(fields)) => fields,
                Some(Err(e)) => {
                    print_json(&json!({"success": false, "error": format!("Invalid payload: {}", e)}));
                    return ExitCode::FAILURE;
                }
            };

            let contract = pipeline.assemble_contract(&fields);
            let Some(out_dir) = docx else {
                print_json(&json!({"success": true, "contract": contract}));
                return ExitCode::SUCCESS;
            };

            match pipeline
                .export_contract(&fields, filename.as_deref())
                .and_then(|download| save(&out_dir, &download).map(|path| (download, path)))
            {
                Ok((download, path)) => {
                    print_json(&json!({
                        "success": true,
                        "contract": contract,
                        "file": manifest(&download, &path, false),
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => failure(e),
            }
        }

        Commands::Export { text_file, title, filename, out_dir, inline } => {
            let text = match fs::read_to_string(&text_file) {
                Ok(text) => text,
                Err(e) => {
                    print_json(&json!({"success": false, "error": format!("{}: {}", text_file.display(), e)}));
                    return ExitCode::FAILURE;
                }
            };

            let request = ExportRequest { title, text, filename };
            match pipeline
                .export(&request)
                .and_then(|download| save(&out_dir, &download).map(|path| (download, path)))
            {
                Ok((download, path)) => {
                    print_json(&json!({"success": true, "file": manifest(&download, &path, inline)}));
                    ExitCode::SUCCESS
                }
                Err(e) => failure(e),
            }
        }
    }
}

fn save(out_dir: &Path, download: &DocxDownload) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&download.filename);
    fs::write(&path, &download.bytes)?;
    Ok(path)
}

fn manifest(download: &DocxDownload, path: &Path, inline: bool) -> Value {
    let mut value = json!({
        "id": download.id,
        "title": download.title,
        "filename": download.filename,
        "path": path.display().to_string(),
        "mime_type": download.mime_type,
        "created_at": download.created_at,
        "size": download.size,
        "sha256": download.sha256,
    });
    if let Some(digest) = &download.fields_digest {
        value["fields_digest"] = json!(digest);
    }
    if inline {
        value["data_base64"] =
            json!(base64::engine::general_purpose::STANDARD.encode(&download.bytes));
    }
    value
}

fn failure(error: ExportError) -> ExitCode {
    print_json(&json!({"success": false, "error": error.to_string()}));
    match error {
        ExportError::NothingToExport => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{}", out),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}
