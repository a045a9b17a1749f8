//! Wombat CLI
//!
//! Parses a selector list and prints what the parser made of it.
//!
//! - wombat 'div.note > p:hover'        # Structure, specificity, flags
//! - wombat --json ':has(> img)'        # The parsed model as JSON
//! - wombat --tokens ':nth-child(2n-1)' # The token stream

use clap::Parser;
use owo_colors::OwoColorize;
use wombat_css::selector::{ComplexSelector, SelectorFlags, SimpleSelector};
use wombat_css::tokenizer::{CSSTokenizer, Span};
use wombat_css::{NestingContext, SelectorError, TokenStream, consume_selector};

/// Wombat: CSS Selectors Level 4 parser inspector
#[derive(Parser, Debug)]
#[command(name = "wombat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show each selector, its flags and specificity
    wombat 'ul > li:nth-child(odd of .item), a[href$=".pdf" i]'

    # Dump the parsed model as JSON
    wombat --json ':is(h1, h2):has(+ p)'

    # Show how the tokenizer splits the input
    wombat --tokens ':nth-child(-n+3)'

    # Parse as the selector of a nested style rule
    wombat --nested '> .child'
"#)]
struct Cli {
    /// The selector list to parse
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Print the parsed selectors as JSON
    #[arg(long)]
    json: bool,

    /// Print the tokens instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Parse as the prelude of a nested style rule
    #[arg(long)]
    nested: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.tokens {
        print_tokens(&cli.selector);
        return Ok(());
    }

    let nesting = if cli.nested {
        NestingContext::Nested
    } else {
        NestingContext::None
    };
    let list = match parse(&cli.selector, nesting) {
        Ok(list) => list,
        Err(err) => {
            print_error(&cli.selector, &err);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for (index, selector) in list.iter().enumerate() {
            print_selector(index + 1, selector);
        }
    }
    Ok(())
}

/// Parse the whole input; anything after the list, `{` included, is an error.
fn parse(input: &str, nesting: NestingContext) -> Result<Vec<ComplexSelector>, SelectorError> {
    let mut stream = TokenStream::new(input);
    let list = consume_selector(&mut stream, nesting, None)?;
    let token = stream.peek().clone();
    if token.is_eof() {
        Ok(list)
    } else {
        Err(SelectorError::TrailingInput {
            found: token.to_string(),
            span: stream.peek_span(),
        })
    }
}

/// Print every token with its span.
fn print_tokens(input: &str) {
    let mut tokenizer = CSSTokenizer::new(input);
    loop {
        let spanned = tokenizer.next_token();
        println!(
            "{:>8}  {:<20} {}",
            spanned.span.to_string().dimmed(),
            spanned.token.token_type().to_string(),
            spanned.token
        );
        if spanned.token.is_eof() {
            break;
        }
    }
}

fn print_selector(number: usize, selector: &ComplexSelector) {
    println!("{} {}", format!("[{number}]").bold(), selector.green());
    println!("    specificity: {}", selector.specificity());
    println!("    flags:       {}", describe_flags(selector.flags));
    for simple in &selector.selectors {
        print_simple(simple);
    }
}

fn print_simple(simple: &SimpleSelector) {
    let text = if simple.is_relative_anchor() {
        "(anchor)".to_owned()
    } else {
        simple.to_string()
    };
    println!(
        "    {:<28} {:<24} {}",
        format!("{:?}", simple.match_kind).cyan(),
        text,
        format!("{:?}", simple.relation).dimmed()
    );
}

fn describe_flags(flags: SelectorFlags) -> String {
    let names: Vec<&str> = [
        (SelectorFlags::CONTAINS_COMPLEX_SELECTOR, "complex"),
        (SelectorFlags::CONTAINS_PSEUDO, "pseudo"),
        (SelectorFlags::CONTAINS_SCOPE_OR_PARENT, "scope-or-parent"),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .map(|(_, name)| name)
    .collect();
    if names.is_empty() {
        "-".to_owned()
    } else {
        names.join(", ")
    }
}

/// Print the error with the input and a caret under the offending token.
fn print_error(input: &str, err: &SelectorError) {
    let Span { start, end } = err.span();
    let width = end.saturating_sub(start).max(1);
    eprintln!("{} {err}", "error:".red().bold());
    eprintln!("    {input}");
    eprintln!(
        "    {}{}",
        " ".repeat(start),
        "^".repeat(width).red().bold()
    );
}
