    use super::*;

    #[test]
    fn test_enter_and_exit_restore_parent() {
        let mut tracker = ScopeTracker::new(true);
        let ns = tracker.enter(ScopeKind::Namespace, Some("ns".into()));
        let record = tracker.enter(ScopeKind::Record(RecordKind::Class), Some("A".into()));
        assert_eq!(tracker.depth(), 2);
        assert_eq!(tracker.get(record).parent, Some(ns));

        assert_eq!(tracker.exit(), Ok(record));
        assert_eq!(tracker.current_id(), ns);
        assert_eq!(tracker.exit(), Ok(ns));
        assert!(tracker.is_file_scope());
    }

    #[test]
    fn test_exit_at_file_scope_is_an_error() {
        let mut tracker = ScopeTracker::new(true);
        assert_eq!(tracker.exit(), Err(StructureError::UnmatchedClose));
        assert!(tracker.is_file_scope());
    }

    #[test]
    fn test_default_access_depends_on_record_kind() {
        let mut tracker = ScopeTracker::new(true);
        tracker.enter(ScopeKind::Record(RecordKind::Class), None);
        assert_eq!(tracker.access_in_force(), Some(Access::Private));
        tracker.enter(ScopeKind::Record(RecordKind::Struct), None);
        assert_eq!(tracker.access_in_force(), Some(Access::Public));
        tracker.enter(ScopeKind::Record(RecordKind::Union), None);
        assert_eq!(tracker.access_in_force(), Some(Access::Public));
    }

    #[test]
    fn test_set_access_only_touches_records() {
        let mut tracker = ScopeTracker::new(true);
        tracker.set_access(Access::Private);
        assert_eq!(tracker.access_in_force(), None);

        tracker.enter(ScopeKind::Record(RecordKind::Class), Some("A".into()));
        tracker.set_access(Access::Protected);
        assert_eq!(tracker.access_in_force(), Some(Access::Protected));

        // Nested records start over with their own default.
        tracker.enter(ScopeKind::Record(RecordKind::Struct), Some("B".into()));
        assert_eq!(tracker.access_in_force(), Some(Access::Public));
        let _ = tracker.exit();
        assert_eq!(tracker.access_in_force(), Some(Access::Protected));
    }

    #[test]
    fn test_template_params_are_transparent() {
        let mut tracker = ScopeTracker::new(true);
        tracker.enter(ScopeKind::Record(RecordKind::Class), Some("Holder".into()));
        tracker.set_access(Access::Public);
        tracker.enter(ScopeKind::TemplateParams, None);
        assert_eq!(tracker.access_in_force(), Some(Access::Public));
        assert_eq!(tracker.enclosing_record_name(), Some("Holder"));
        tracker.set_access(Access::Private);
        let _ = tracker.exit();
        assert_eq!(tracker.access_in_force(), Some(Access::Private));
    }

    #[test]
    fn test_c_mode_has_no_access() {
        let mut tracker = ScopeTracker::new(false);
        tracker.enter(ScopeKind::Record(RecordKind::Struct), Some("S".into()));
        tracker.set_access(Access::Private);
        assert_eq!(tracker.access_in_force(), None);
    }

    #[test]
    fn test_function_body_and_ancestors() {
        let mut tracker = ScopeTracker::new(true);
        let ns = tracker.enter(ScopeKind::Namespace, Some("n".into()));
        let body = tracker.enter(ScopeKind::FunctionBody, None);
        assert!(tracker.in_function_body());
        assert_eq!(tracker.access_in_force(), None);
        assert_eq!(tracker.ancestors().collect::<Vec<_>>(), vec![body, ns, ScopeId::FILE]);
    }
