//! Top-level CLI parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;

use crate::entities::overlap::{self, detect_overlaps};
use crate::error::GeneDoseError;
use crate::reference;
use crate::sources::cds::{CdsClient, RawAnalysisResult};
use crate::transform;

#[derive(Parser, Debug)]
#[command(
    name = "genedose",
    about = "Reconcile pharmacogenomic CDS results: gene-drug lookups, overlap warnings, polypharmacy summaries",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON instead of Markdown
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Genes associated with a drug (exact match)
    Genes { drug: String },
    /// Drugs associated with a gene symbol (exact match)
    Drugs { gene: String },
    /// List reference drugs matching a name fragment
    SearchDrugs { fragment: String },
    /// Gene-overlap interaction warnings for a drug selection
    Interactions {
        #[arg(required = true, num_args = 1..)]
        drugs: Vec<String>,
    },
    /// Normalize a raw CDS payload from a file (or stdin)
    Report { file: Option<PathBuf> },
    /// Upload a VCF to the CDS service and render the normalized summary
    Analyze {
        /// Path to the genomic variant file
        #[arg(long)]
        vcf: PathBuf,
        /// Drug(s) to assess; repeat for polypharmacy
        #[arg(short = 'd', long = "drug", required = true)]
        drugs: Vec<String>,
        /// Override the CDS service base URL
        #[arg(long)]
        base: Option<String>,
    },
    /// Check CDS service connectivity
    Health {
        /// Override the CDS service base URL
        #[arg(long)]
        base: Option<String>,
    },
}

fn cds_client(base: Option<String>) -> Result<CdsClient, GeneDoseError> {
    match base {
        Some(base) => CdsClient::with_base(base),
        None => CdsClient::new(),
    }
}

pub async fn run(cli: Cli) -> Result<(), GeneDoseError> {
    match cli.command {
        Commands::Genes { drug } => {
            let rows = reference::associations_for_drug(&drug);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No gene associations for \"{}\".", drug.trim());
            } else {
                println!("# Genes for {}\n", drug.trim());
                println!("| Gene | RxNorm | ATC |");
                println!("|------|--------|-----|");
                for row in rows {
                    println!(
                        "| {} | {} | {} |",
                        row.gene,
                        row.rxnorm_id.unwrap_or("-"),
                        row.atc_code.unwrap_or("-")
                    );
                }
            }
        }
        Commands::Drugs { gene } => {
            let drugs = reference::drugs_for_gene(&gene);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&drugs)?);
            } else if drugs.is_empty() {
                println!("No drug associations for \"{}\".", gene.trim());
            } else {
                println!("# Drugs for {}\n", gene.trim().to_ascii_uppercase());
                for drug in drugs {
                    println!("- {drug}");
                }
            }
        }
        Commands::SearchDrugs { fragment } => {
            let hits = reference::search_drugs(&fragment);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No reference drugs match \"{}\".", fragment.trim());
            } else {
                for drug in hits {
                    println!("- {drug}");
                }
            }
        }
        Commands::Interactions { drugs } => {
            let overlaps = detect_overlaps(&drugs);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&overlaps)?);
            } else {
                print!("{}", overlap::overlaps_to_markdown(&overlaps));
            }
        }
        Commands::Report { file } => {
            let bytes = match file {
                Some(path) => tokio::fs::read(&path).await?,
                None => {
                    let mut buf = Vec::new();
                    tokio::io::stdin().read_to_end(&mut buf).await?;
                    buf
                }
            };
            let raw = RawAnalysisResult::from_slice(&bytes)?;
            let summary = transform::normalize(raw)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.to_markdown());
            }
        }
        Commands::Analyze { vcf, drugs, base } => {
            let vcf_name = vcf
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload.vcf")
                .to_string();
            let vcf_bytes = tokio::fs::read(&vcf).await?;
            let client = cds_client(base)?;
            let raw = client.analyze(&vcf_name, vcf_bytes, &drugs).await?;
            let summary = transform::normalize(raw)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.to_markdown());
            }
        }
        Commands::Health { base } => {
            // Propagate failures unprinted; the binary boundary reports
            // them exactly once.
            let client = cds_client(base)?;
            let latency = client.ping().await?;
            println!("CDS service: ok ({}ms)", latency.as_millis());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn interactions_requires_at_least_one_drug() {
        assert!(Cli::try_parse_from(["genedose", "interactions"]).is_err());
        let cli = Cli::try_parse_from(["genedose", "interactions", "codeine", "tramadol"])
            .expect("parse");
        let Commands::Interactions { drugs } = cli.command else {
            panic!("expected interactions command");
        };
        assert_eq!(drugs, vec!["codeine", "tramadol"]);
    }

    #[test]
    fn analyze_accepts_repeated_drug_flags() {
        let cli = Cli::try_parse_from([
            "genedose", "analyze", "--vcf", "sample.vcf", "-d", "codeine", "-d", "warfarin",
        ])
        .expect("parse");
        let Commands::Analyze { drugs, vcf, base } = cli.command else {
            panic!("expected analyze command");
        };
        assert_eq!(drugs, vec!["codeine", "warfarin"]);
        assert_eq!(vcf, PathBuf::from("sample.vcf"));
        assert_eq!(base, None);
    }

    #[tokio::test]
    async fn health_failure_propagates_the_error_without_printing_it() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let uri = server.uri();
        let cli =
            Cli::try_parse_from(["genedose", "health", "--base", uri.as_str()]).expect("parse");
        let err = run(cli).await.expect_err("unhealthy service must fail the command");
        assert!(matches!(err, GeneDoseError::Api { .. }));
    }

    #[tokio::test]
    async fn health_success_reports_ok() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let cli =
            Cli::try_parse_from(["genedose", "health", "--base", uri.as_str()]).expect("parse");
        assert!(run(cli).await.is_ok());
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["genedose", "genes", "codeine", "--json"]).expect("parse");
        assert!(cli.json);
    }
}
