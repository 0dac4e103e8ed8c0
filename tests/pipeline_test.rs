use cvm1d::analysis::Analysis;
use cvm1d::config::RunConfig;
use cvm1d::mutate::swap_two_sites;
use cvm1d::report;
use cvm1d::select::SiteSelection;

#[test]
fn test_default_run_end_to_end() {
    let cfg = RunConfig::default();
    let lattice = cfg.build_lattice().unwrap();
    assert_eq!(lattice.len(), 24);

    let analysis = Analysis::of(&lattice, cfg.zero_log, cfg.sweep).unwrap();
    assert_eq!(
        analysis.vars.to_array(),
        [0.25, 0.5, 0.25, 0.25, 0.5, 0.25, 0.125, 0.25, 0.125, 0.125, 0.25, 0.125]
    );
    assert!((analysis.neg_entropy + 2.0 * 2f64.ln()).abs() < 1e-12);
    assert_eq!(analysis.sweep.len(), 50);
}

#[test]
fn test_comparison_run() {
    let cfg = RunConfig::default();
    let original = cfg.build_lattice().unwrap();
    let shape = original.shape();

    let first = SiteSelection::new(0, 3).index(shape).unwrap();
    let second = SiteSelection::new(1, 0).index(shape).unwrap();
    let revised = swap_two_sites(&original, first, second).unwrap();

    let a = Analysis::of(&original, cfg.zero_log, cfg.sweep).unwrap();
    let b = Analysis::of(&revised, cfg.zero_log, cfg.sweep).unwrap();
    assert!(b.neg_entropy > a.neg_entropy, "swap should lower the entropy here");

    let table = report::config_vars_table("Revised", &b.vars);
    assert!(table.contains("0.333"));
    assert!(table.contains("1.000"));
    assert_eq!(report::neg_entropy_line("revised", b.neg_entropy),
               "  Neg-Entropy for the revised system is: -1.212");
}

#[test]
fn test_site_table_lists_every_site() {
    let lattice = RunConfig::default().build_lattice().unwrap();
    let table = report::site_table(&lattice);
    // Two row headers, two column headers, 24 site lines, blank separators.
    let site_lines = table
        .lines()
        .filter(|l| l.split_whitespace().count() == 8 && !l.contains("Col"))
        .count();
    assert_eq!(site_lines, 24);
    // (0,0): col 0, A, wLeft 2, wRight 1, yLeft 2, yRight 1, zLeft 5, node 0
    assert!(table.lines().any(|l| l.split_whitespace().collect::<Vec<_>>()
        == ["0", "1", "2", "1", "2", "1", "5", "0"]));
}
