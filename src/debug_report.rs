//! Pretty-printed run report for the CLI.

use tagline::{ParseVerbose, ParsedTag};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

struct Paint {
    enabled: bool,
}

impl Paint {
    fn wrap(&self, code: &str, text: &str) -> String {
        if self.enabled { format!("{code}{text}{RESET}") } else { text.to_string() }
    }
}

pub fn print_run(input: &str, out: &ParseVerbose, color: bool) {
    let paint = Paint { enabled: color };
    let result = &out.result;
    let details = &out.details;

    println!("{}", paint.wrap(BOLD, &format!("input: {input:?}")));
    println!("clean title: {:?}", result.clean_title);
    println!("confidence:  {:.2}", result.confidence);
    if let Some(error) = &result.error {
        println!("{}", paint.wrap(RED, &format!("error: {error}")));
    }

    println!("\n{}", paint.wrap(BOLD, &format!("tags ({}):", result.tags.len())));
    for tag in &result.tags {
        println!("  {}", paint.wrap(GREEN, &format_tag(tag)));
    }

    if !result.conflicts.is_empty() {
        println!("\n{}", paint.wrap(BOLD, &format!("conflicts ({}):", result.conflicts.len())));
        for group in &result.conflicts {
            println!("  kept      {}", paint.wrap(GREEN, &format_tag(&group.winner)));
            for tag in &group.discarded {
                println!("  discarded {}", paint.wrap(YELLOW, &format_tag(tag)));
            }
        }
    }

    println!("\n{}", paint.wrap(BOLD, &format!("candidates ({}):", details.all_candidates.len())));
    for tag in &details.all_candidates {
        println!("  {}", paint.wrap(DIM, &format_tag(tag)));
    }

    println!("\n{}", paint.wrap(BOLD, "recognizers:"));
    for report in &details.recognizers {
        let status = if report.active {
            format!("{} candidate(s) in {:?}", report.produced, report.duration)
        } else {
            "inactive".to_string()
        };
        println!("  {:<10} {status}", report.name);
    }

    println!(
        "\ntiming: total {:?} (recognize {:?}, resolve {:?})",
        details.total, details.recognize, details.resolve
    );
}

fn format_tag(tag: &ParsedTag) -> String {
    format!(
        "[{:>3}..{:<3}] {:<8} {:?} -> {:?} ({:.2})",
        tag.start,
        tag.end,
        tag.tag_type.name(),
        tag.original_text,
        tag.display_text,
        tag.confidence
    )
}
