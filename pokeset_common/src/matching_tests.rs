//! Unit tests for catalog and inventory matching.

use super::*;

fn venusaur() -> CatalogCard {
    CatalogCard {
        set_name: "Scarlet & Violet 151".to_string(),
        set_code: "SV151".to_string(),
        card_number: "003".to_string(),
        name: "Venusaur ex".to_string(),
        finishes: vec!["holo".to_string()],
        languages: vec!["EN".to_string()],
    }
}

fn machop() -> CatalogCard {
    CatalogCard {
        set_name: "Scarlet & Violet 151".to_string(),
        set_code: "SV151".to_string(),
        card_number: "066".to_string(),
        name: "Machop".to_string(),
        finishes: vec!["normal".to_string(), "reverse".to_string()],
        languages: vec!["EN".to_string(), "DE".to_string()],
    }
}

fn stock(number: &str, finish: &str, language: &str, price: f64, qty: u32) -> InventoryItem {
    InventoryItem {
        id: InventoryItem::derive_id("SV151", number, language, finish),
        set_name: "Scarlet & Violet 151".to_string(),
        set_code: "SV151".to_string(),
        card_number: number.to_string(),
        name: String::new(),
        finish: finish.to_string(),
        language: language.to_string(),
        condition: "NM/M".to_string(),
        price,
        qty,
        fictitious: false,
    }
}

fn want_number(number: &str, finish: &str) -> WantRow {
    WantRow {
        set_code: Some("SV151".to_string()),
        card_number: Some(number.to_string()),
        finish: Some(finish.to_string()),
        language: Some("EN".to_string()),
        quantity: Some(1),
        ..Default::default()
    }
}

mod catalog_tests {
    use super::*;

    #[test]
    fn matches_by_exact_number() {
        let catalog = vec![machop(), venusaur()];
        let row = normalize_row(&want_number("003", "holo"));
        let found = find_catalog_match(&row, &catalog).unwrap();
        assert_eq!(found.name, "Venusaur ex");
    }

    #[test]
    fn numbers_are_not_coerced() {
        let catalog = vec![venusaur()];
        let row = normalize_row(&want_number("3", "holo"));
        assert!(find_catalog_match(&row, &catalog).is_none());
    }

    #[test]
    fn set_fields_compare_case_insensitively() {
        let catalog = vec![venusaur()];
        let row = normalize_row(&WantRow {
            set_name: Some("  scarlet & violet 151 ".to_string()),
            set_code: Some("sv151".to_string()),
            card_number: Some("003".to_string()),
            ..Default::default()
        });
        assert!(find_catalog_match(&row, &catalog).is_some());
    }

    #[test]
    fn other_set_does_not_match() {
        let catalog = vec![venusaur()];
        let row = normalize_row(&WantRow {
            set_code: Some("PAL".to_string()),
            card_number: Some("003".to_string()),
            ..Default::default()
        });
        assert!(find_catalog_match(&row, &catalog).is_none());
    }

    #[test]
    fn falls_back_to_name() {
        let catalog = vec![venusaur(), machop()];
        let row = normalize_row(&WantRow {
            set_name: Some("Scarlet & Violet 151".to_string()),
            card_number: Some("999".to_string()),
            card_name: Some("MACHOP".to_string()),
            ..Default::default()
        });
        let found = find_catalog_match(&row, &catalog).unwrap();
        assert_eq!(found.card_number, "066");
    }

    #[test]
    fn first_candidate_wins() {
        let mut reprint = venusaur();
        reprint.set_name = "Another Set".to_string();
        let catalog = vec![venusaur(), reprint];
        let row = normalize_row(&WantRow {
            set_code: Some("SV151".to_string()),
            card_name: Some("Venusaur ex".to_string()),
            ..Default::default()
        });
        let found = find_catalog_match(&row, &catalog).unwrap();
        assert_eq!(found.set_name, "Scarlet & Violet 151");
    }
}

mod inventory_tests {
    use super::*;

    #[test]
    fn prefers_exact_finish_and_language() {
        let inventory = vec![
            stock("066", "normal", "EN", 0.5, 3),
            stock("066", "reverse", "DE", 1.5, 1),
            stock("066", "reverse", "EN", 2.0, 2),
        ];
        let row = normalize_row(&want_number("066", "rev"));
        let item = find_inventory_match(&machop(), &row, &inventory).unwrap();
        assert_eq!(item.id, "SV151-066-EN-reverse");
    }

    #[test]
    fn any_finish_ignores_finish() {
        let inventory = vec![
            stock("066", "reverse", "DE", 1.5, 1),
            stock("066", "normal", "EN", 0.5, 3),
        ];
        let row = normalize_row(&want_number("066", "any"));
        let item = find_inventory_match(&machop(), &row, &inventory).unwrap();
        assert_eq!(item.id, "SV151-066-EN-normal");
    }

    #[test]
    fn language_compares_case_insensitively() {
        let inventory = vec![stock("066", "normal", "en", 0.5, 3)];
        let row = normalize_row(&want_number("066", "normal"));
        let item = find_inventory_match(&machop(), &row, &inventory).unwrap();
        assert_eq!(item.language, "en");
    }

    #[test]
    fn falls_back_to_any_copy_in_stock() {
        let inventory = vec![
            stock("066", "reverse", "EN", 2.0, 0),
            stock("066", "normal", "DE", 0.4, 2),
        ];
        let row = normalize_row(&want_number("066", "reverse"));
        let item = find_inventory_match(&machop(), &row, &inventory).unwrap();
        assert_eq!(item.id, "SV151-066-DE-normal");
    }

    #[test]
    fn sold_out_card_has_no_match() {
        let inventory = vec![stock("066", "normal", "EN", 0.5, 0), stock("003", "holo", "EN", 30.0, 2)];
        let row = normalize_row(&want_number("066", "normal"));
        assert!(find_inventory_match(&machop(), &row, &inventory).is_none());
    }
}

mod match_row_tests {
    use super::*;

    #[test]
    fn available_within_budget() {
        let catalog = vec![venusaur()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 2)];

        let result = match_row(&want_number("003", "holo"), &catalog, &inventory);

        assert_eq!(result.status, MatchStatus::Available);
        assert_eq!(result.inventory.as_ref().unwrap().price, 30.0);
        assert_eq!(result.catalog.as_ref().unwrap().name, "Venusaur ex");
        assert!(result.reasons.is_empty());
        assert_eq!(result.key, "SV151-003-EN-holo");
    }

    #[test]
    fn over_budget_cites_both_prices() {
        let catalog = vec![venusaur()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 2)];
        let mut row = want_number("003", "holo");
        row.max_price = Some(20.0);

        let result = match_row(&row, &catalog, &inventory);

        assert_eq!(result.status, MatchStatus::OverBudget);
        assert!(result.reasons[0].contains("30"));
        assert!(result.reasons[0].contains("20"));
        assert!(result.inventory.is_some());
    }

    #[test]
    fn price_equal_to_budget_is_available() {
        let catalog = vec![venusaur()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 2)];
        let mut row = want_number("003", "holo");
        row.max_price = Some(30.0);

        assert_eq!(match_row(&row, &catalog, &inventory).status, MatchStatus::Available);
    }

    #[test]
    fn zero_budget_is_ignored() {
        let catalog = vec![venusaur()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 2)];
        let mut row = want_number("003", "holo");
        row.max_price = Some(0.0);

        assert_eq!(match_row(&row, &catalog, &inventory).status, MatchStatus::Available);
    }

    #[test]
    fn negative_budget_is_over_budget() {
        let catalog = vec![venusaur()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 2)];
        let mut row = want_number("003", "holo");
        row.max_price = Some(-5.0);

        let result = match_row(&row, &catalog, &inventory);

        assert_eq!(result.status, MatchStatus::OverBudget);
        assert_eq!(result.reasons, vec!["price 30 > max_price -5".to_string()]);
    }

    #[test]
    fn unavailable_gets_three_search_links() {
        let catalog = vec![venusaur()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 0)];

        let result = match_row(&want_number("003", "holo"), &catalog, &inventory);

        assert_eq!(result.status, MatchStatus::Unavailable);
        assert!(result.inventory.is_none());
        let labels: Vec<_> = result.search_links.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["Cardmarket", "eBay", "TCGplayer"]);
        for link in &result.search_links {
            assert!(link.url.contains("Venusaur%20ex"), "{}", link.url);
            assert!(link.url.contains("Scarlet%20%26%20Violet%20151%20EN"), "{}", link.url);
        }
    }

    #[test]
    fn not_found_has_reason() {
        let result = match_row(&want_number("150", "holo"), &[venusaur()], &[]);
        assert_eq!(result.status, MatchStatus::NotFound);
        assert_eq!(result.reasons, vec!["not found in catalog (check set/number/name)"]);
        assert!(result.catalog.is_none());
    }

    #[test]
    fn missing_number_and_name_is_format_error() {
        let row = WantRow {
            set_code: Some("SV151".to_string()),
            ..Default::default()
        };
        let result = match_row(&row, &[venusaur()], &[]);
        assert_eq!(result.status, MatchStatus::FormatError);
        assert!(result.reasons.iter().any(|r| r.contains("card_number or card_name")));
    }

    #[test]
    fn non_positive_quantity_is_format_error() {
        let mut row = want_number("003", "holo");
        row.quantity = Some(0);
        let result = match_row(&row, &[venusaur()], &[stock("003", "holo", "EN", 30.0, 2)]);
        assert_eq!(result.status, MatchStatus::FormatError);
        assert!(result.catalog.is_none());
    }
}

mod match_rows_tests {
    use super::*;

    #[test]
    fn keeps_input_order_and_isolates_errors() {
        let catalog = vec![venusaur(), machop()];
        let inventory = vec![stock("003", "holo", "EN", 30.0, 2)];
        let rows = vec![
            want_number("066", "reverse"),
            WantRow::default(),
            want_number("003", "holo"),
        ];

        let results = match_rows(&rows, &catalog, &inventory);

        let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![MatchStatus::Unavailable, MatchStatus::FormatError, MatchStatus::Available]
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(match_rows(&[], &[venusaur()], &[]).is_empty());
    }
}
