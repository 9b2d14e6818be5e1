//! Run command - extract, persist, and walk the dispatch queue.
//!
//! One dispatch queue is opened per processed document. The operator
//! drives it from stdin: send or skip the selected phone, move the
//! selection, or abandon the rest of the queue.

use std::io::{BufRead, Write};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use romaneio_core::dispatch::render_message;
use romaneio_core::store::{JsonlStore, RecordStore, StoredRecord};
use romaneio_core::{Document, DispatchQueue, DispatchSink, QueueState, RecordAssembler};

use super::extract::expand_inputs;
use super::load_config;
use crate::sink::WebSession;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Input file or glob pattern (.pdf or .json token dump)
    #[arg(required = true)]
    input: String,

    /// Persist records but do not open dispatch queues
    #[arg(long)]
    no_dispatch: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// One operator keystroke, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Send,
    Skip,
    Select(usize),
    Abandon,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let assembler = RecordAssembler::new(&config);
    let mut store = JsonlStore::new(&config.store.path);
    let mut session = WebSession::new(&config.dispatch.endpoint);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let total = files.len();

    for (index, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");
        println!(
            "{} [{}/{}] {}",
            style("→").cyan(),
            index + 1,
            total,
            style(name).bold()
        );

        // document-level duplicate pre-check; a failed query is treated
        // as not yet processed
        match store.exists(name) {
            Ok(true) => {
                info!(file = name, "already processed, skipping");
                println!("{} Already processed, skipping", style("ℹ").blue());
                continue;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(file = name, %err, "duplicate check failed, processing anyway");
            }
        }

        let document = match Document::load(path) {
            Ok(doc) => doc,
            Err(err) if args.continue_on_error => {
                warn!(file = %path.display(), %err, "skipping file");
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let extraction = assembler.assemble(&document);
        for warning in &extraction.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
        if extraction.records.is_empty() {
            continue;
        }

        persist_records(&mut store, &extraction.records);

        if args.no_dispatch {
            continue;
        }

        // The message carries the document's first plate; every phone
        // of the document receives the same text.
        let first = &extraction.records[0];
        let message = render_message(&config.dispatch.template, &first.plate);
        let mut queue =
            DispatchQueue::new(document.pdf_name.clone(), message, first.phones.clone());
        operator_loop(&mut queue, &mut session, &mut input)?;
    }

    session.close();
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn persist_records(store: &mut JsonlStore, records: &[romaneio_core::ExtractedRecord]) {
    for record in records {
        match store.insert(&StoredRecord::from_record(record)) {
            Ok(()) => {
                println!(
                    "{} Recorded plate {}",
                    style("✓").green(),
                    style(&record.plate).bold()
                );
            }
            Err(err) => {
                warn!(plate = %record.plate, %err, "failed to persist record");
            }
        }
    }
}

/// Walk one queue until it drains or the operator abandons it.
fn operator_loop(
    queue: &mut DispatchQueue,
    sink: &mut dyn DispatchSink,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    while queue.state() == QueueState::Active {
        render_queue(queue)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // stdin closed mid-queue
            queue.abandon();
            break;
        }
        let Some(action) = parse_action(&line) else {
            eprintln!(
                "{} Commands: [s]end, s[k]ip, a number to select, [a]bandon",
                style("?").cyan()
            );
            continue;
        };
        match action {
            Action::Send => {
                queue.send_selected(sink);
            }
            Action::Skip => {
                queue.skip_selected();
            }
            Action::Select(n) => {
                // operator numbering is 1-based
                if n == 0 || !queue.select(n - 1) {
                    eprintln!("{} No entry {}", style("✗").red(), n);
                }
            }
            Action::Abandon => queue.abandon(),
        }
    }

    match queue.state() {
        QueueState::Empty => println!(
            "{} Queue for {} done: {} sent, {} skipped",
            style("✓").green(),
            queue.pdf_name(),
            queue.sent().len(),
            queue.skipped().len()
        ),
        QueueState::Abandoned => println!(
            "{} Queue for {} abandoned with {} pending",
            style("⚠").yellow(),
            queue.pdf_name(),
            queue.pending().len()
        ),
        QueueState::Active => unreachable!("loop exits only on terminal states"),
    }

    Ok(())
}

fn render_queue(queue: &DispatchQueue) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    writeln!(
        out,
        "{} {}: {}",
        style("Dispatch").bold(),
        queue.pdf_name(),
        style(queue.message()).dim()
    )?;
    let selected = queue.selected().map(|(i, _)| i);
    for (i, phone) in queue.pending().iter().enumerate() {
        let marker = if Some(i) == selected { ">" } else { " " };
        writeln!(out, " {} {}. {}", style(marker).cyan(), i + 1, phone)?;
    }
    write!(out, "[s/k/№/a] ")?;
    out.flush()?;
    Ok(())
}

fn parse_action(line: &str) -> Option<Action> {
    let trimmed = line.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "s" | "send" => Some(Action::Send),
        "k" | "skip" => Some(Action::Skip),
        "a" | "abandon" | "q" | "quit" => Some(Action::Abandon),
        other => other.parse::<usize>().ok().map(Action::Select),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use romaneio_core::error::DispatchError;

    #[derive(Default)]
    struct NullSink {
        sent: Vec<String>,
    }

    impl DispatchSink for NullSink {
        fn send(&mut self, phone: &str, _message: &str) -> Result<(), DispatchError> {
            self.sent.push(phone.to_string());
            Ok(())
        }
    }

    #[test]
    fn actions_parse_with_aliases() {
        assert_eq!(parse_action("s\n"), Some(Action::Send));
        assert_eq!(parse_action("SEND"), Some(Action::Send));
        assert_eq!(parse_action("k"), Some(Action::Skip));
        assert_eq!(parse_action(" 2 "), Some(Action::Select(2)));
        assert_eq!(parse_action("q"), Some(Action::Abandon));
        assert_eq!(parse_action("banana"), None);
        assert_eq!(parse_action(""), None);
    }

    #[test]
    fn scripted_session_drains_the_queue() {
        let mut queue = DispatchQueue::new(
            "a.pdf",
            "msg",
            vec!["11987654321".to_string(), "2140028922".to_string()],
        );
        let mut sink = NullSink::default();
        let mut script = b"s\nk\n" as &[u8];
        operator_loop(&mut queue, &mut sink, &mut script).unwrap();
        assert_eq!(queue.state(), QueueState::Empty);
        assert_eq!(sink.sent, vec!["5511987654321"]);
        assert_eq!(queue.skipped(), ["2140028922"]);
    }

    #[test]
    fn closed_stdin_abandons_the_queue() {
        let mut queue = DispatchQueue::new("a.pdf", "msg", vec!["11987654321".to_string()]);
        let mut sink = NullSink::default();
        let mut script = b"" as &[u8];
        operator_loop(&mut queue, &mut sink, &mut script).unwrap();
        assert_eq!(queue.state(), QueueState::Abandoned);
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn unknown_input_reprompts_instead_of_acting() {
        let mut queue = DispatchQueue::new("a.pdf", "msg", vec!["11987654321".to_string()]);
        let mut sink = NullSink::default();
        let mut script = b"banana\ns\n" as &[u8];
        operator_loop(&mut queue, &mut sink, &mut script).unwrap();
        assert_eq!(queue.state(), QueueState::Empty);
        assert_eq!(sink.sent.len(), 1);
    }
}
