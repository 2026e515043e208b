use colored::*;

use crate::expander::ExpandedStep;
use crate::pipeline::LearnResponse;

pub(crate) fn print_plan(topic: &str, response: &LearnResponse) {
    println!("{}", format!("📚 Learning plan: {topic}").bold().green());
    println!();
    for (index, step) in response.plan.iter().enumerate() {
        println!("{} {}", format!("{:>2}.", index + 1).bold(), step.title.bold());
        if !step.description.is_empty() {
            println!("    {}", step.description);
        }
    }

    if !response.examples.is_empty() {
        println!();
        println!("{}", "🔗 Resources".bold().cyan());
        for resource in &response.examples {
            println!("  • {} {}", resource.title.bold(), resource.url.blue());
            if !resource.description.is_empty() {
                println!("    {}", resource.description.dimmed());
            }
        }
    }

    if let Some(message) = &response.message {
        println!();
        println!("{}", format!("⚠️  {message}").yellow());
    }
}

pub(crate) fn print_expansion(title: &str, expanded: &ExpandedStep) {
    println!("{}", format!("🔬 {title}").bold().green());
    if let Some(context) = &expanded.additional_context {
        println!();
        println!("{context}");
    }
    print_section("Practical details", &expanded.practical_details);
    print_section("Important considerations", &expanded.important_considerations);
    print_section("Real-world examples", &expanded.real_world_examples);
    print_section("Potential challenges", &expanded.potential_challenges);
}

fn print_section(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", heading.bold().cyan());
    for item in items {
        println!("  • {item}");
    }
}
