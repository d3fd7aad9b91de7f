use offerscout_core::{Offer, ResultsView};

/// Renders one offer as a text card.
pub fn offer_card(offer: &Offer) -> String {
    let mut lines = vec![
        format!("{} — {}", offer.provider, offer.name),
        format!(
            "  {} Mbps {} | {} months",
            offer.speed_mbps, offer.connection_type, offer.duration_months
        ),
        format!(
            "  {:.2} EUR/month first years, {:.2} EUR/month after two years",
            offer.cost_first_years_eur, offer.after_two_years_eur
        ),
    ];
    match offer.limit_from_gb {
        Some(gb) => lines.push(format!("  data cap from {gb} GB")),
        None => lines.push("  unlimited data".to_string()),
    }
    if let Some(tv) = &offer.tv {
        lines.push(format!("  incl. TV: {tv}"));
    }
    if let Some(max_age) = offer.max_age {
        lines.push(format!("  only available up to age {max_age}"));
    }
    if offer.installation_included {
        lines.push("  installation included".to_string());
    }
    lines.join("\n")
}

/// Renders the full results view: summary, visible cards, pagination line.
pub fn results(view: &ResultsView) {
    println!("{}", view.summary());
    for offer in &view.visible {
        println!();
        println!("{}", offer_card(offer));
    }
    // The pagination widget is suppressed for a single page, like the UI.
    if view.total_pages > 1 {
        println!();
        println!("Page {} of {}", view.current_page, view.total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_mentions_cap_tv_and_age_only_when_present() {
        let mut offer = Offer {
            provider: "ByteMe".to_string(),
            name: "Byte Basic 50".to_string(),
            speed_mbps: 50,
            cost_eur: 29.99,
            cost_first_years_eur: 19.99,
            after_two_years_eur: 29.99,
            duration_months: 24,
            limit_from_gb: None,
            installation_included: false,
            tv: None,
            max_age: None,
            connection_type: "DSL".to_string(),
        };
        let card = offer_card(&offer);
        assert!(card.contains("unlimited data"));
        assert!(!card.contains("incl. TV"));
        assert!(!card.contains("age"));

        offer.limit_from_gb = Some(250);
        offer.tv = Some("MegaTV".to_string());
        offer.max_age = Some(27);
        let card = offer_card(&offer);
        assert!(card.contains("data cap from 250 GB"));
        assert!(card.contains("incl. TV: MegaTV"));
        assert!(card.contains("up to age 27"));
    }
}
