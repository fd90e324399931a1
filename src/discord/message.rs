use crate::models::{Budget, Price, ReportPolicy, ScrapeResult};

pub fn title_line(title: &str) -> String {
    format!("\nName: **{}**", title)
}

/// Annotation appended to a price, e.g. `   (-12.500% less)`.
pub fn percent_note(percent: f64) -> String {
    let change = if percent == 0.0 {
        "no change".to_string()
    } else if percent < 0.0 {
        format!("{:.3}% less", percent)
    } else {
        format!("+{:.3}% more", percent)
    };
    format!("   ({})", change)
}

pub fn price_line(price: &Price, budget: Budget) -> String {
    match price {
        Price::Available(listed) => {
            let percent = budget.deviation(listed.amount as f64);
            format!("\nPrice: **{}{}**\n", listed.display, percent_note(percent))
        }
        Price::Unavailable => format!("\nPrice: **{}**\n", price),
    }
}

/// Report text for one product, or an empty string when its policy filters it out.
pub fn product_fragment(result: &ScrapeResult, budget: Budget, policy: ReportPolicy) -> String {
    if !policy.admits(&result.price, budget) {
        return String::new();
    }
    format!("{}{}", title_line(&result.title), price_line(&result.price, budget))
}

/// Stand-in for a product that could not be fetched or read.
pub fn error_fragment(url: &str) -> String {
    format!("\n**{}**: error\n", url)
}
