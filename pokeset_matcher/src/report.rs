//! Plain-text match report for the command-line mode

use pokeset_common::{MatchResult, MatchStatus, ProposedCart};

/// Formats match results and the proposed cart for the terminal
pub fn format_match_report(results: &[MatchResult], cart: &ProposedCart) -> String {
    let mut output = String::new();

    for (index, result) in results.iter().enumerate() {
        let row = &result.row;
        let catalog = result.catalog.as_ref();
        let set = catalog
            .map(|c| c.set_name.as_str())
            .or(row.set_name.as_deref())
            .or(row.set_code.as_deref())
            .unwrap_or("-");
        let number = catalog
            .map(|c| c.card_number.as_str())
            .or(row.card_number.as_deref())
            .unwrap_or("-");
        let name = catalog
            .map(|c| c.name.as_str())
            .or(row.card_name.as_deref())
            .unwrap_or("Unknown");

        output.push_str(&format!(
            "{:>3}. [{}] {} x {} ({} #{}) {} {}\n",
            index + 1,
            result.status,
            row.quantity,
            name,
            set,
            number,
            row.finish.to_uppercase(),
            row.language
        ));

        if let Some(item) = &result.inventory {
            output.push_str(&format!(
                "     Offer: {:.2} ({} {}, {} in stock)\n",
                item.price, item.finish, item.language, item.qty
            ));
        }
        for reason in &result.reasons {
            output.push_str(&format!("     Note: {reason}\n"));
        }
        if result.status != MatchStatus::Available {
            for link in &result.search_links {
                output.push_str(&format!("     {}: {}\n", link.label, link.url));
            }
        }
    }

    output.push('\n');
    if cart.is_empty() {
        output.push_str("Proposed cart: no available items\n");
    } else {
        output.push_str("Proposed cart:\n");
        for item in &cart.items {
            output.push_str(&format!(
                "    {} x {} ({} #{}, {} {}) @ {:.2}\n",
                item.qty,
                item.name,
                item.set,
                item.number,
                item.finish.to_uppercase(),
                item.language,
                item.price
            ));
        }
        output.push_str(&format!("Subtotal: {:.2}\n", cart.subtotal));
    }

    output
}
