//! Interactive session driving a local converter widget.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use converter_hex::ConverterWidget;
use converter_types::{CurrencyCode, RateProvider, WidgetView};

const HELP: &str = "\
Commands:
  amount <text>   set the amount to convert
  from <CODE>     select the source currency
  to <CODE>       select the target currency
  swap            exchange source and target
  show            print the widget once pending lookups settle
  help            show this message
  quit            leave the session";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Amount(String),
    From(CurrencyCode),
    To(CurrencyCode),
    Swap,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let currency = |arg: &str| arg.parse::<CurrencyCode>().map_err(|e| e.to_string());

    let command = match word.to_lowercase().as_str() {
        "amount" | "a" => ReplCommand::Amount(rest.to_string()),
        "from" => ReplCommand::From(currency(rest)?),
        "to" => ReplCommand::To(currency(rest)?),
        "swap" | "s" => ReplCommand::Swap,
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(format!("Unknown command '{}' (type 'help')", other)),
    };
    Ok(Some(command))
}

/// One-line rendering of the widget.
pub fn render_line(view: &WidgetView) -> String {
    let inputs = format!(
        "{} {} {} -> {} {}",
        view.amount, view.source.flag, view.source.code, view.target.flag, view.target.code
    );
    let mut line = if view.loading {
        format!("{}  converting...", inputs)
    } else {
        match &view.display {
            Some(display) => format!("{} {} = {}", view.amount, view.source.code, display),
            None => inputs,
        }
    };
    if let Some(error) = &view.error {
        line.push_str(&format!("  (rate lookup failed: {})", error));
    }
    line
}

/// Runs the session until `quit` or end of input.
pub async fn run<P: RateProvider + 'static>(provider: P) -> Result<()> {
    let widget = ConverterWidget::mount(provider);

    // Re-render on every state change
    let mut updates = widget.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let view = WidgetView::from(&*updates.borrow_and_update());
            println!("{}", render_line(&view));
        }
    });

    println!("{}", HELP);
    println!("{}", render_line(&widget.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ReplCommand::Amount(text))) => {
                widget.set_amount(text);
            }
            Ok(Some(ReplCommand::From(code))) => {
                widget.select_source(code);
            }
            Ok(Some(ReplCommand::To(code))) => {
                widget.select_target(code);
            }
            Ok(Some(ReplCommand::Swap)) => {
                widget.swap();
            }
            Ok(Some(ReplCommand::Show)) => {
                let state = widget.settled().await;
                println!("{}", render_line(&WidgetView::from(&state)));
            }
            Ok(Some(ReplCommand::Help)) => println!("{}", HELP),
            Ok(Some(ReplCommand::Quit)) => break,
            Err(message) => eprintln!("{}", message),
        }
    }

    renderer.abort();
    Ok(())
}
