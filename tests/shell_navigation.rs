// End-to-end walk through the shell: sign in, visit every module, edit
// records, and check that panels never leak across switches.

use culture_desk::{
    verify, AppConfig, Attributes, DisplayEdits, ModuleError, ModuleKind, ModuleRegistry,
    PanelContext, PanelError, Shell, ALL_CATEGORIES,
};
use std::time::Duration;

fn shell_in(dir: &std::path::Path) -> Shell {
    let mut config = AppConfig::default();
    config.dashboard.poll_interval_ms = 10;
    config.storage.planning_snapshots = dir.join("plans.json");
    config.storage.export_dir = dir.to_path_buf();
    Shell::new(ModuleRegistry::new(), PanelContext::new(tokio::runtime::Handle::current(), config))
}

#[test]
fn test_login_gate() {
    assert!(verify("admin", "123456").valid);
    assert_eq!(verify("admin", "").reason, "credentials empty");
    assert_eq!(verify("root", "123456").reason, "identity mismatch");
}

#[tokio::test]
async fn test_every_module_mounts_in_sidebar_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_in(dir.path());

    for kind in ModuleKind::ALL {
        shell.switch_to(kind.name()).unwrap();
        let panel = shell.mounted().unwrap();
        assert_eq!(panel.kind(), kind);
        assert!(!panel.controller().list("", ALL_CATEGORIES).is_empty(), "{} has no seeds", kind);
    }
    assert_eq!(shell.mounted_name(), Some("feedback"));
}

#[tokio::test]
async fn test_edits_do_not_survive_a_round_trip_switch() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_in(dir.path());

    shell.switch_to("workflow").unwrap();
    let panel = shell.mounted_mut().unwrap();
    let controller = panel.controller_mut();
    let id = controller.list("", ALL_CATEGORIES)[0].id.clone();
    controller.select(&id).unwrap();
    controller.save(&DisplayEdits::new("Edited in place").with_field("requester", "Ops")).unwrap();

    shell.switch_to("planning").unwrap();
    shell.switch_to("workflow").unwrap();

    // A fresh panel was built; the old record id does not exist any more
    let controller = shell.mounted_mut().unwrap().controller_mut();
    assert!(matches!(controller.select(&id), Err(PanelError::RecordNotFound(_))));
    assert!(controller.list("Edited in place", ALL_CATEGORIES).is_empty());
}

#[tokio::test]
async fn test_dashboard_feed_updates_then_stops_on_switch() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_in(dir.path());

    shell.switch_to("dashboard").unwrap();
    let token = shell.mounted().unwrap().background_task().unwrap();
    let finished = shell.mounted().unwrap().background_finished().unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    shell.tick();
    assert!(shell.mounted().unwrap().headline().is_some());

    shell.switch_to("schedule").unwrap();
    assert!(token.is_cancelled());

    // The task itself winds down, so nothing is delivered any more
    tokio::time::timeout(Duration::from_secs(1), finished.cancelled())
        .await
        .expect("metrics task still running after switch");
}

#[tokio::test]
async fn test_unknown_module_leaves_container_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_in(dir.path());
    shell.switch_to("analytics").unwrap();

    let err = shell.switch_to("marketing").unwrap_err();
    assert!(matches!(err, ModuleError::UnknownModule(ref name) if name == "marketing"));
    assert!(shell.is_empty());
    assert!(shell.mounted().is_none());
}

#[tokio::test]
async fn test_recompute_then_export_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_in(dir.path());
    shell.switch_to("analytics").unwrap();

    let panel = shell.mounted_mut().unwrap();
    let id = panel.controller().list("", ALL_CATEGORIES)[0].id.clone();
    panel.controller_mut().select(&id).unwrap();

    let edits: Attributes = [("views".to_string(), 10_000.0), ("engagement".to_string(), 2_000.0)]
        .into_iter()
        .collect();
    let score = panel.controller_mut().recompute(&edits).unwrap();
    assert!((0.0..=100.0).contains(&score));

    panel.run_action('E').unwrap();
    assert!(dir.path().join(format!("{}.csv", id)).exists());
}

#[tokio::test]
async fn test_planning_snapshot_round_trip_through_shell() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_in(dir.path());
    shell.switch_to("planning").unwrap();

    let panel = shell.mounted_mut().unwrap();
    let id = panel.controller().list("", ALL_CATEGORIES)[0].id.clone();
    panel.controller_mut().select(&id).unwrap();

    panel.run_action('S').unwrap();
    assert!(dir.path().join("plans.json").exists());

    let depth: Attributes = [("depth".to_string(), 1.0)].into_iter().collect();
    panel.controller_mut().recompute(&depth).unwrap();
    panel.run_action('L').unwrap();

    let record = panel.controller().focused().unwrap();
    assert_ne!(record.attribute("depth"), 1.0);
}
