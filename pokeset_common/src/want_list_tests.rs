//! Unit tests for paste and CSV want-list parsing.

use super::*;

mod parse_paste_tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let rows = parse_paste("003 | Venusaur ex | holo | 1 | 30");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].card_number.as_deref(), Some("003"));
        assert_eq!(rows[0].card_name.as_deref(), Some("Venusaur ex"));
        assert_eq!(rows[0].finish.as_deref(), Some("holo"));
        assert_eq!(rows[0].quantity, Some(1));
        assert_eq!(rows[0].max_price, Some(30.0));
    }

    #[test]
    fn skips_blank_lines() {
        let text = "\n003 | Venusaur ex | holo | 1 | 30\n   \n\t\n066 | Machop | reverse | 2 | 2\n\n";
        let rows = parse_paste(text);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].card_number.as_deref(), Some("066"));
        assert_eq!(rows[1].quantity, Some(2));
    }

    #[test]
    fn handles_windows_line_endings() {
        let rows = parse_paste("003 | Venusaur ex\r\n066 | Machop\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].card_name.as_deref(), Some("Machop"));
    }

    #[test]
    fn non_numeric_first_field_is_not_a_number_or_name() {
        let rows = parse_paste("Venusaur | Venusaur ex");
        assert_eq!(rows[0].card_number, None);
        assert_eq!(rows[0].card_name.as_deref(), Some("Venusaur ex"));
    }

    #[test]
    fn missing_trailing_fields_are_absent() {
        let rows = parse_paste("003");
        assert_eq!(rows[0].card_number.as_deref(), Some("003"));
        assert_eq!(rows[0].card_name, None);
        assert_eq!(rows[0].finish, None);
        assert_eq!(rows[0].quantity, None);
        assert_eq!(rows[0].max_price, None);
    }

    #[test]
    fn unparsable_quantity_defaults_to_one() {
        let rows = parse_paste("003 | Venusaur ex | holo | lots | 30");
        assert_eq!(rows[0].quantity, Some(1));
    }

    #[test]
    fn fractional_quantity_asks_for_a_card() {
        let rows = parse_paste("Set: Scarlet & Violet 151\n003 | Venusaur ex | holo | 0.5\n066 | Machop | reverse | 2,7");
        assert_eq!(rows[0].quantity, Some(1));
        assert_eq!(rows[1].quantity, Some(2));
        let row = crate::normalize::normalize_row(&rows[0]);
        assert!(crate::normalize::validate_row(&row).is_ok());
    }

    #[test]
    fn negative_quantity_is_kept() {
        let rows = parse_paste("003 | Venusaur ex | holo | -2");
        assert_eq!(rows[0].quantity, Some(-2));
    }

    #[test]
    fn unparsable_or_zero_price_is_omitted() {
        let rows = parse_paste("003 | Venusaur ex | holo | 1 | cheap\n003 | Venusaur ex | holo | 1 | 0");
        assert_eq!(rows[0].max_price, None);
        assert_eq!(rows[1].max_price, None);
    }

    #[test]
    fn accepts_comma_decimal_price() {
        let rows = parse_paste("066 | Machop | reverse | 2 | 1,50");
        assert_eq!(rows[0].max_price, Some(1.5));
    }

    #[test]
    fn set_directive_applies_to_following_rows() {
        let text = "003 | Venusaur ex\nSet: Scarlet & Violet 151 (English)\n066 | Machop";
        let rows = parse_paste(text);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].set_name, None);
        assert_eq!(rows[1].set_name.as_deref(), Some("Scarlet & Violet 151"));
        assert_eq!(rows[1].language.as_deref(), Some("EN"));
    }

    #[test]
    fn language_directive_accepts_names_and_codes() {
        let rows = parse_paste("Language: German\n003 | Venusaur ex\nlang: jp\n006 | Charizard ex");
        assert_eq!(rows[0].language.as_deref(), Some("DE"));
        assert_eq!(rows[1].language.as_deref(), Some("JP"));
    }

    #[test]
    fn other_key_value_lines_are_rows() {
        let rows = parse_paste("Budget: 120 CHF");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], WantRow::default());
    }
}

mod defaults_tests {
    use super::*;

    #[test]
    fn fills_only_missing_fields() {
        let defaults = WantListDefaults {
            set_name: Some("Scarlet & Violet 151".to_string()),
            set_code: None,
            language: Some("DE".to_string()),
        };
        let mut rows = vec![
            WantRow {
                language: Some("EN".to_string()),
                ..Default::default()
            },
            WantRow {
                set_name: Some("  ".to_string()),
                ..Default::default()
            },
        ];

        defaults.apply(&mut rows);

        assert_eq!(rows[0].set_name.as_deref(), Some("Scarlet & Violet 151"));
        assert_eq!(rows[0].language.as_deref(), Some("EN"));
        assert_eq!(rows[1].set_name.as_deref(), Some("Scarlet & Violet 151"));
        assert_eq!(rows[1].language.as_deref(), Some("DE"));
        assert_eq!(rows[1].set_code, None);
    }
}

mod parse_csv_tests {
    use super::*;

    #[test]
    fn parses_template_columns() {
        let csv = "set_name,set_code,language,card_number,card_name,finish,quantity,max_price,min_condition,notes\n\
                   Scarlet & Violet 151,SV151,en,003,Venusaur ex,holo,1,30,NM/M,centered\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.set_name.as_deref(), Some("Scarlet & Violet 151"));
        assert_eq!(row.set_code.as_deref(), Some("SV151"));
        assert_eq!(row.language.as_deref(), Some("en"));
        assert_eq!(row.card_number.as_deref(), Some("003"));
        assert_eq!(row.quantity, Some(1));
        assert_eq!(row.max_price, Some(30.0));
        assert_eq!(row.notes.as_deref(), Some("centered"));
    }

    #[test]
    fn tolerates_missing_reordered_and_unknown_columns() {
        let csv = "card_name,set_code,comment\n Machop , SV151 ,hello\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].card_name.as_deref(), Some("Machop"));
        assert_eq!(rows[0].set_code.as_deref(), Some("SV151"));
        assert_eq!(rows[0].card_number, None);
        assert_eq!(rows[0].quantity, None);
    }

    #[test]
    fn fractional_quantity_is_rounded_up_to_one() {
        let csv = "set_code,card_number,quantity\nSV151,003,0.5\nSV151,066,0\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].quantity, Some(1));
        assert_eq!(rows[1].quantity, Some(0));
    }

    #[test]
    fn empty_cells_are_absent_and_bad_numbers_ignored() {
        let csv = "set_code,card_number,quantity,max_price\nSV151,066,,abc\nSV151,,two,\"2,5\"\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quantity, None);
        assert_eq!(rows[0].max_price, None);
        assert_eq!(rows[1].card_number, None);
        assert_eq!(rows[1].quantity, None);
        assert_eq!(rows[1].max_price, Some(2.5));
    }

    #[test]
    fn keeps_zero_quantity_for_validation() {
        let csv = "set_code,card_number,quantity\nSV151,003,0\n";
        let rows = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].quantity, Some(0));
    }

    #[test]
    fn header_only_gives_no_rows() {
        let rows = parse_csv("set_code,card_number\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}

#[test]
fn language_code_lookup() {
    assert_eq!(language_code("English"), Some("EN"));
    assert_eq!(language_code(" de "), Some("DE"));
    assert_eq!(language_code("Klingon"), None);
}
