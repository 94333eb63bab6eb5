use crate::*;

#[derive(Debug)]
struct TestIssue(Severity);

impl Display for TestIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "something happened")
    }
}

impl Diagnostic for TestIssue {
    fn severity(&self) -> Severity {
        self.0
    }
}

#[derive(Debug)]
struct DefaultIssue;

impl Display for DefaultIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unspecified")
    }
}

impl Diagnostic for DefaultIssue {}

#[test]
fn counts_follow_severity() {
    let mut issues = IssueSet::new();
    assert!(issues.is_empty());
    issues.add(TestIssue(Severity::Info));
    issues.add(TestIssue(Severity::Warning));
    issues.add(TestIssue(Severity::Warning));
    issues.add(TestIssue(Severity::Error));
    assert_eq!(issues.len(), 4);
    assert_eq!(issues.count_of(Severity::Info), 1);
    assert_eq!(issues.num_warnings(), 2);
    assert_eq!(issues.num_errors(), 1);
    assert!(issues.has_warning());
    assert!(issues.has_error());
}

#[test]
fn default_severity_is_warning() {
    assert_eq!(Severity::default(), Severity::Warning);
    assert_eq!(DefaultIssue.severity(), Severity::Warning);
    assert!(!Severity::Warning.is_error());
    assert!(Severity::Error.is_error());
}

#[test]
fn display_prefixes_severity() {
    let mut issues = IssueSet::new();
    issues.add(TestIssue(Severity::Warning));
    issues.add(TestIssue(Severity::Error));
    assert_eq!(
        issues.to_string(),
        "warning: something happened\nerror: something happened\n"
    );
}

#[test]
fn iteration_preserves_order() {
    let mut issues = IssueSet::new();
    issues.add(TestIssue(Severity::Error));
    issues.add(TestIssue(Severity::Info));
    let order: Vec<Severity> = issues.iter().map(|i| i.severity()).collect();
    assert_eq!(order, vec![Severity::Error, Severity::Info]);
}
