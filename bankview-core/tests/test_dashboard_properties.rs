use bankview_core::overrides::{OverrideMap, OverrideStore, merge};
use bankview_core::{
    CategoryFilter, Dashboard, FilterCriteria, MonthFilter, MonthSummary, Totals, Transaction,
    TxnType, TypeFilter, category_breakdown, filter, totals,
};

fn statement() -> Vec<Transaction> {
    vec![
        Transaction::new("1", "28.03.2024", 2.0, TxnType::Income)
            .with_payer("ERIK H.")
            .with_description("sladoled"),
        Transaction::new("2", "27.03.2024", 6.0, TxnType::Expense)
            .with_payer("35001-0001864446")
            .with_description("BESTERO*SLASCICARNA OH"),
        Transaction::new("3", "15.03.2024", 45.9, TxnType::Expense)
            .with_description("PETROL 0231")
            .with_category("Petrol"),
        Transaction::new("4", "03.02.2024", 1450.0, TxnType::Income)
            .with_description("PLACA 02/2024")
            .with_category("Income"),
        Transaction::new("5", "02.02.2024", 10.99, TxnType::Expense)
            .with_description("Spotify P1234")
            .with_category("Spotify"),
        Transaction::new("6", "31.02.2024", 4.0, TxnType::Expense).with_description("broken date"),
        Transaction::new("7", "01.02.2024", 0.5, TxnType::Expense).with_category(""),
    ]
}

fn criteria_grid() -> Vec<FilterCriteria> {
    let months = [
        MonthFilter::All,
        MonthFilter::Month("2024-03".into()),
        MonthFilter::Month("2024-02".into()),
    ];
    let searches = ["", "spotify", "  PETROL ", "zzz"];
    let types = [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense];
    let cats = [
        CategoryFilter::All,
        CategoryFilter::Uncategorized,
        CategoryFilter::Named("Petrol".into()),
    ];

    let mut out = Vec::new();
    for m in &months {
        for s in searches {
            for t in types {
                for c in &cats {
                    out.push(
                        FilterCriteria::new()
                            .with_month(m.clone())
                            .with_search(s)
                            .with_type(t)
                            .with_category(c.clone()),
                    );
                }
            }
        }
    }
    out
}

/// Every filter result is an order-preserving subsequence of the input.
#[test]
fn test_filter_output_is_ordered_subsequence() {
    let txns = statement();
    for c in criteria_grid() {
        let out = filter::apply(&txns, &c);
        let mut cursor = txns.iter();
        for picked in &out {
            assert!(
                cursor.any(|t| std::ptr::eq(t, *picked)),
                "{:?} broke ordering for {:?}",
                picked.id,
                c
            );
        }
    }
}

#[test]
fn test_filter_is_repeatable() {
    let txns = statement();
    for c in criteria_grid() {
        assert_eq!(filter::apply(&txns, &c), filter::apply(&txns, &c));
    }
}

#[test]
fn test_breakdown_covers_exactly_the_expenses() {
    let txns = statement();
    for c in criteria_grid() {
        let view = filter::apply(&txns, &c);
        let sum: f64 = category_breakdown(view.iter().copied()).iter().map(|b| b.total).sum();
        let expenses = totals(view.iter().copied()).expenses;
        assert!((sum - expenses).abs() < 1e-9, "{sum} != {expenses} for {c:?}");
    }
}

/// Override wins over what the server says, end to end through the file store.
#[test]
fn test_override_file_beats_server_category() {
    let dir = tempfile::tempdir().unwrap();
    let store = OverrideStore::in_dir(dir.path());
    let mut map = OverrideMap::new();
    map.insert("42".into(), "Transport".into());
    store.save(&map);

    let mut txns = vec![
        Transaction::new("42", "10.01.2024", 3.2, TxnType::Expense).with_category("Other"),
    ];
    merge(&mut txns, &store.load());

    let mut d = Dashboard::new();
    d.replace_all(txns, Vec::<MonthSummary>::new(), Totals::new(0.0, 3.2));
    assert_eq!(d.transaction("42").unwrap().category.as_deref(), Some("Transport"));
    assert_eq!(d.filter_options().categories, vec!["Transport"]);
}

#[test]
fn test_month_filter_skips_impossible_date() {
    let txns = statement();
    let c = FilterCriteria::new().with_month(MonthFilter::Month("2024-02".into()));
    let ids: Vec<_> = filter::apply(&txns, &c).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "5", "7"]);
}
