use crate::install::{InstallReport, Plan};

pub fn format_roles(roles: &[String]) -> String {
    if roles.is_empty() {
        return "No roles installed\n".to_string();
    }
    let mut out = format!("Installed roles ({}):\n", roles.len());
    for role in roles {
        out.push_str(&format!("  - {role}\n"));
    }
    out
}

pub fn format_report(report: &InstallReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Installed:   {}\n", report.target.display()));
    out.push_str(&format!("Source:      {}\n", report.source));
    if let Some(ref b) = report.backup {
        out.push_str(&format!("Backup:      {}\n", b.display()));
    }
    if let Some(ref b) = report.home_backup {
        out.push_str(&format!("Home backup: {}\n", b.display()));
    }
    out.push_str(&format!("Roles:       {}\n", report.roles.len()));
    out
}

/// What an install would do, without doing it.
pub fn format_plan(plan: &Plan, target_exists: bool, home_file_exists: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source:      {}\n", plan.source));
    out.push_str(&format!("Target:      {}\n", plan.target.display()));
    if target_exists {
        out.push_str("Existing:    yes (would ask, then back up)\n");
    } else {
        out.push_str("Existing:    no\n");
    }
    if let Some(ref f) = plan.home_file {
        out.push_str(&format!(
            "Home file:   {}{}\n",
            f.display(),
            if home_file_exists { " (would copy aside)" } else { "" }
        ));
    }
    out.push_str(&format!("Prune:       {}\n", plan.prune.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn roles_listed_in_order() {
        let roles = vec!["architect".to_string(), "reviewer".to_string()];
        assert_eq!(
            format_roles(&roles),
            "Installed roles (2):\n  - architect\n  - reviewer\n"
        );
    }

    #[test]
    fn no_roles() {
        assert_eq!(format_roles(&[]), "No roles installed\n");
    }

    #[test]
    fn report_omits_absent_backups() {
        let report = InstallReport {
            source: "https://example.com/b.git".into(),
            target: PathBuf::from("/h/.claude"),
            backup: None,
            home_backup: None,
            pruned: vec![],
            roles: vec!["a".into()],
        };
        let text = format_report(&report);
        assert!(text.contains("Installed:   /h/.claude\n"));
        assert!(!text.contains("Backup"));
        assert!(text.ends_with("Roles:       1\n"));
    }

    #[test]
    fn report_json_shape() {
        let report = InstallReport {
            source: "s".into(),
            target: PathBuf::from("/h/.claude"),
            backup: Some(PathBuf::from("/h/.claude.backup.20260101_000000")),
            home_backup: None,
            pruned: vec![".git".into()],
            roles: vec![],
        };
        let v: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(v["target"], "/h/.claude");
        assert_eq!(v["backup"], "/h/.claude.backup.20260101_000000");
        assert!(v["home_backup"].is_null());
        assert_eq!(v["pruned"][0], ".git");
    }

    #[test]
    fn plan_mentions_backup_only_when_target_exists() {
        let plan = Plan::new("s", "/h/.claude").with_home_file("/h/CLAUDE.md");
        let fresh = format_plan(&plan, false, false);
        assert!(fresh.contains("Existing:    no\n"));
        assert!(fresh.contains("Home file:   /h/CLAUDE.md\n"));

        let existing = format_plan(&plan, true, true);
        assert!(existing.contains("would ask, then back up"));
        assert!(existing.contains("(would copy aside)"));
        assert!(existing.contains("Prune:       README.md, .git, .vscode, setup.sh\n"));
    }
}
