#[cfg(test)]
mod tests {
    use crate::{
        docked_rect, slot_rect, slot_rect_on_border, DockConfig, DockContext, LocationPath, Panel,
        PanelIndex, Registry, SideCode,
    };
    use dockspace_core::{
        hash_id_key, CursorIcon, DockSlot, DockStatus, PointerState, Rect, Size, SplitDirection,
        Ui, UiMetrics, Vec2, WindowFlags,
    };
    use dockspace_host::HeadlessUi;
    use proptest::prelude::*;

    const DISPLAY: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    const SCREEN: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    /// Far from every tab, slot and splitter.
    const IDLE: Vec2 = Vec2::new(790.0, 590.0);

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn rect_approx_eq(a: &Rect, b: &Rect) -> bool {
        approx_eq(a.x, b.x)
            && approx_eq(a.y, b.y)
            && approx_eq(a.width, b.width)
            && approx_eq(a.height, b.height)
    }

    fn idle() -> PointerState {
        PointerState {
            position: IDLE,
            ..Default::default()
        }
    }

    fn pressed_at(position: Vec2) -> PointerState {
        let mut p = PointerState {
            position,
            ..Default::default()
        };
        p.down[0] = true;
        p.clicked[0] = true;
        p
    }

    fn held_at(position: Vec2, delta: Vec2) -> PointerState {
        let mut p = PointerState {
            position,
            delta,
            ..Default::default()
        };
        p.down[0] = true;
        p.dragging[0] = true;
        p
    }

    fn released_at(position: Vec2) -> PointerState {
        let mut p = PointerState {
            position,
            ..Default::default()
        };
        p.released[0] = true;
        p
    }

    struct Harness {
        ctx: DockContext,
        ui: HeadlessUi,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                ctx: DockContext::new(),
                ui: HeadlessUi::new(DISPLAY),
            }
        }

        /// One frame beginning and ending each panel in `labels`.
        fn frame(&mut self, pointer: PointerState, labels: &[&str]) {
            self.frame_with(pointer, |ctx, ui| {
                for label in labels {
                    ctx.begin_panel(ui, label, None, WindowFlags::empty());
                    ctx.end_panel(ui);
                }
            });
        }

        fn frame_with(&mut self, pointer: PointerState, f: impl FnOnce(&mut DockContext, &mut HeadlessUi)) {
            self.ui.begin_frame(pointer);
            self.ctx.begin_dockspace(&mut self.ui);
            f(&mut self.ctx, &mut self.ui);
            self.ctx.end_dockspace(&mut self.ui);
            assert_eq!(self.ui.scope_depth(), 0, "unbalanced scopes");
        }

        fn idx(&self, label: &str) -> PanelIndex {
            self.ctx.find(label).expect("panel registered")
        }

        fn panel(&self, label: &str) -> &Panel {
            self.ctx.panel(self.idx(label)).expect("panel alive")
        }

        fn rect(&self, label: &str) -> Rect {
            self.panel(label).rect()
        }

        fn dock(&mut self, label: &str, dest: &str, slot: DockSlot) {
            let (panel, dest) = (self.idx(label), self.idx(dest));
            self.ctx.dock(panel, Some(dest), slot);
        }
    }

    fn show(ctx: &mut DockContext, ui: &mut HeadlessUi, label: &str, opened: Option<&mut bool>) -> bool {
        let visible = ctx.begin_panel(ui, label, opened, WindowFlags::empty());
        ctx.end_panel(ui);
        visible
    }

    // ──────────────────────────────────────────
    // Registration
    // ──────────────────────────────────────────

    #[test]
    fn first_panel_docks_and_later_ones_float() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);

        assert_eq!(h.panel("A").status(), DockStatus::Docked);
        assert_eq!(h.panel("B").status(), DockStatus::Float);
        assert_eq!(h.ctx.root_dock(), Some(h.idx("A")));
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn new_panels_start_over_the_workspace() {
        let mut ctx = DockContext::new();
        let mut ui = HeadlessUi::new(DISPLAY);
        let host = Rect::new(100.0, 50.0, 400.0, 300.0);

        ui.begin_frame(idle());
        ui.begin_window("Host", None, host, WindowFlags::NO_TITLE_BAR | WindowFlags::NO_MOVE);
        ctx.begin_dockspace(&mut ui);
        show(&mut ctx, &mut ui, "A", None);
        show(&mut ctx, &mut ui, "B", None);
        ctx.end_dockspace(&mut ui);
        ui.end_window();

        assert_eq!(ctx.workspace(), host);
        for label in ["A", "B"] {
            let index = ctx.find(label).expect("panel registered");
            let panel = ctx.panel(index).expect("panel alive");
            assert_eq!(panel.rect(), host, "{label}");
        }
        assert_eq!(ui.scope_depth(), 0);
    }

    #[test]
    fn dock_right_splits_root_in_half() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);

        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 600.0)));

        let split = h.panel("A").parent().expect("A is in a split");
        assert_eq!(h.panel("B").parent(), Some(split));
        assert_eq!(
            h.ctx.panel(split).map(|s| s.children()),
            Some([Some(h.idx("A")), Some(h.idx("B"))])
        );
        assert_eq!(h.ctx.root_dock(), Some(split));

        // Stable across the next layout pass.
        h.frame(idle(), &["A", "B"]);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 600.0)));
    }

    #[test]
    fn dock_left_and_top_put_panel_first() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Left);
        h.dock("C", "A", DockSlot::Top);

        let outer = h.panel("B").parent().expect("outer split");
        assert_eq!(h.ctx.panel(outer).map(|s| s.children()[0]), Some(Some(h.idx("B"))));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&h.rect("C"), &Rect::new(400.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(400.0, 300.0, 400.0, 300.0)));

        let inner = h.panel("C").parent().expect("inner split");
        assert!(!h.ctx.registry().is_horizontal(inner));
        assert!(h.ctx.registry().is_horizontal(outer));
    }

    #[test]
    fn label_id_key_keeps_identity_across_titles() {
        let mut h = Harness::new();
        h.frame(idle(), &["Console###console"]);
        h.frame(idle(), &["Console (3)###console"]);

        assert_eq!(h.ctx.registry().len(), 1);
        let p = h.panel("anything###console");
        assert_eq!(p.label(), "Console (3)###console");
        assert_eq!(p.display_label(), "Console (3)");
    }

    #[test]
    fn hidden_suffix_distinguishes_panels_with_same_title() {
        let mut h = Harness::new();
        h.frame(idle(), &["Log##left", "Log##right"]);

        assert_eq!(h.ctx.registry().len(), 2);
        assert_ne!(h.idx("Log##left"), h.idx("Log##right"));
        assert_eq!(h.panel("Log##right").display_label(), "Log");
    }

    #[test]
    fn hash_collision_does_not_merge_panels() {
        let mut registry = Registry::new();
        // A record whose key differs from "alpha" but shares its hash.
        let colliding = Panel::new("beta", hash_id_key("alpha"), DockStatus::Float, true, SCREEN);
        let beta = registry.insert(colliding);

        assert_eq!(registry.find("alpha"), None);
        let (alpha, created) = registry.get_or_create("alpha", true, SCREEN);
        assert!(created);
        assert_ne!(alpha, beta);
        assert_eq!(registry[alpha].id(), registry[beta].id());
    }

    // ──────────────────────────────────────────
    // Tabs
    // ──────────────────────────────────────────

    #[test]
    fn tab_docking_appends_and_activates() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Tab);
        h.dock("C", "A", DockSlot::Tab);

        let group = h.ctx.registry().tab_group(h.idx("B"));
        assert_eq!(group, vec![h.idx("A"), h.idx("B"), h.idx("C")]);
        assert!(!h.panel("A").is_active());
        assert!(!h.panel("B").is_active());
        assert!(h.panel("C").is_active());
        for label in ["B", "C"] {
            assert_eq!(h.rect(label), h.rect("A"));
            assert_eq!(h.panel(label).parent(), None);
        }
    }

    #[test]
    fn tab_siblings_follow_layout_changes() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Tab);

        h.ui.set_display_size(Size::new(1000.0, 600.0));
        h.frame(idle(), &["A", "B", "C"]);

        let expected = Rect::new(500.0, 0.0, 500.0, 600.0);
        assert!(rect_approx_eq(&h.rect("B"), &expected));
        assert!(rect_approx_eq(&h.rect("C"), &expected));
        assert_eq!(h.panel("C").parent(), h.panel("B").parent());
    }

    #[test]
    fn only_the_active_tab_submits_content() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Tab);

        let mut visible = Vec::new();
        h.frame_with(idle(), |ctx, ui| {
            visible.push(show(ctx, ui, "A", None));
            visible.push(show(ctx, ui, "B", None));
        });
        assert_eq!(visible, vec![false, true]);
    }

    #[test]
    fn clicking_a_tab_activates_it() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Tab);

        // List button at x 8..24, then tab "A" at 39..46.
        let on_tab_a = Vec2::new(42.0, 10.0);
        h.frame(pressed_at(on_tab_a), &["A", "B"]);
        assert!(h.panel("B").is_active());
        h.frame(released_at(on_tab_a), &["A", "B"]);

        assert!(h.panel("A").is_active());
        assert!(!h.panel("B").is_active());
    }

    #[test]
    fn tab_list_popup_selects_tab() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Tab);

        let on_list = Vec2::new(12.0, 10.0);
        h.frame(pressed_at(on_list), &["A", "B"]);
        h.ui.choose_in_popup("A");
        h.frame(released_at(on_list), &["A", "B"]);

        assert!(h.panel("A").is_active());
        assert!(h.ui.text_lines().iter().any(|l| l == "B"), "popup lists every tab");
    }

    #[test]
    fn dragging_a_tab_tears_it_off() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Tab);

        // Tab "B" sits at x 61..68.
        h.frame(pressed_at(Vec2::new(64.0, 10.0)), &["A", "B"]);
        h.frame(held_at(Vec2::new(300.0, 300.0), Vec2::new(236.0, 290.0)), &["A", "B"]);

        assert_eq!(h.panel("B").status(), DockStatus::Dragged);
        assert_eq!(h.ctx.registry().tab_group(h.idx("A")), vec![h.idx("A")]);
        assert!(h.panel("A").is_active());
    }

    #[test]
    fn close_button_clears_host_flag_and_replays_location() {
        let mut h = Harness::new();
        let mut open_b = true;
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            show(ctx, ui, "B", Some(&mut open_b));
        });
        h.dock("B", "A", DockSlot::Right);

        // B's tab at x 423..430, close button at 438..454.
        let on_close = Vec2::new(446.0, 12.0);
        for pointer in [pressed_at(on_close), released_at(on_close)] {
            h.frame_with(pointer, |ctx, ui| {
                show(ctx, ui, "A", None);
                show(ctx, ui, "B", Some(&mut open_b));
            });
        }
        assert!(!open_b);
        assert_eq!(h.panel("B").location().to_string(), "0");

        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            assert!(!show(ctx, ui, "B", Some(&mut open_b)));
        });
        assert_eq!(h.panel("B").status(), DockStatus::Float);
        assert_eq!(h.panel("A").parent(), None);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 800.0, 600.0)));

        open_b = true;
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            assert!(show(ctx, ui, "B", Some(&mut open_b)));
        });
        assert_eq!(h.panel("B").status(), DockStatus::Docked);
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 600.0)));
    }

    // ──────────────────────────────────────────
    // Split layout
    // ──────────────────────────────────────────

    #[test]
    fn children_tile_parent_exactly_with_truncation() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Bottom);

        h.ui.set_display_size(Size::new(801.0, 601.0));
        h.frame(idle(), &["A", "B", "C"]);

        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 400.0, 601.0)));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 401.0, 300.0)));
        assert!(rect_approx_eq(&h.rect("C"), &Rect::new(400.0, 300.0, 401.0, 301.0)));
    }

    #[test]
    fn root_is_clamped_to_minimum_size() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);

        h.ui.set_display_size(Size::new(20.0, 600.0));
        h.frame(idle(), &["A", "B"]);

        // Leaf minimum is 16 wide; two leaves side by side need 32.
        let root = h.ctx.root_dock().expect("root split");
        assert!(approx_eq(h.ctx.panel(root).map_or(0.0, |p| p.size().width), 32.0));
        assert!(approx_eq(h.rect("A").width, 16.0));
        assert!(approx_eq(h.rect("B").width, 16.0));
        assert!(approx_eq(h.rect("B").x, 16.0));
    }

    #[test]
    fn leaf_minimum_follows_host_line_height() {
        let mut h = Harness::new();
        h.ui.set_metrics(UiMetrics {
            line_height: 30.0,
            ..UiMetrics::default()
        });
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Bottom);

        h.ui.set_display_size(Size::new(800.0, 50.0));
        h.frame(idle(), &["A", "B"]);

        // Each leaf needs 16 + 30 of height; stacked they need 92.
        let root = h.ctx.root_dock().expect("root split");
        assert!(approx_eq(h.ctx.panel(root).map_or(0.0, |p| p.size().height), 92.0));
        assert!(approx_eq(h.rect("A").height, 46.0));
        assert!(approx_eq(h.rect("B").y, 46.0));
    }

    #[test]
    fn min_size_sums_along_split_axis() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Bottom);

        let leaf_min = Size::new(16.0, 33.0);
        let registry = h.ctx.registry();
        let root = h.ctx.root_dock().expect("root split");
        assert_eq!(registry.min_size(h.idx("A"), leaf_min), leaf_min);
        assert_eq!(registry.min_size(root, leaf_min), Size::new(32.0, 66.0));
    }

    #[test]
    fn undock_collapses_split_into_survivor() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);
        let split = h.panel("A").parent().expect("split");

        h.ctx.undock(h.idx("B"));

        assert!(h.ctx.panel(split).is_none());
        assert_eq!(h.ctx.registry().len(), 2);
        assert_eq!(h.panel("A").parent(), None);
        assert_eq!(h.panel("B").parent(), None);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert_eq!(h.ctx.root_dock(), Some(h.idx("A")));
    }

    #[test]
    fn chained_undocks_collapse_each_level() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Bottom);
        assert_eq!(h.ctx.registry().len(), 5);
        let outer = h.panel("A").parent().expect("outer split");

        h.ctx.undock(h.idx("C"));
        assert_eq!(h.ctx.registry().len(), 4);
        assert_eq!(h.panel("B").parent(), Some(outer));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 600.0)));

        h.ctx.undock(h.idx("B"));
        assert_eq!(h.ctx.registry().len(), 3);
        assert_eq!(h.panel("A").parent(), None);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn undocking_group_head_promotes_next_tab() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B", "C"]);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Tab);
        let split = h.panel("B").parent().expect("split");

        h.ctx.undock(h.idx("B"));

        assert_eq!(h.ctx.panel(split).map(|s| s.children()[1]), Some(Some(h.idx("C"))));
        assert_eq!(h.panel("C").prev_tab(), None);
        assert!(h.panel("C").is_active());
        assert_eq!(h.panel("C").parent(), Some(split));
    }

    #[test]
    fn splitter_drag_resizes_within_minimums() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);

        // Handle covers x 400..403.
        h.frame(pressed_at(Vec2::new(401.0, 300.0)), &["A", "B"]);
        assert_eq!(h.ui.cursor(), CursorIcon::ResizeEw);

        h.frame(held_at(Vec2::new(451.0, 300.0), Vec2::new(50.0, 0.0)), &["A", "B"]);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 450.0, 600.0)));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(450.0, 0.0, 350.0, 600.0)));

        h.frame(held_at(Vec2::new(900.0, 300.0), Vec2::new(1000.0, 0.0)), &["A", "B"]);
        assert!(approx_eq(h.rect("B").width, 16.0));
        assert!(approx_eq(h.rect("A").width, 784.0));

        h.frame(released_at(Vec2::new(900.0, 300.0)), &["A", "B"]);
        let root = h.ctx.root_dock().expect("root split");
        assert_eq!(h.ctx.panel(root).map(|p| p.status()), Some(DockStatus::Docked));
    }

    // ──────────────────────────────────────────
    // Drag and drop
    // ──────────────────────────────────────────

    /// Grab B's title bar and carry it to `target`.
    fn drag_b_to(h: &mut Harness, target: Vec2) {
        let grab = Vec2::new(300.0, 5.0);
        h.frame(pressed_at(grab), &["A", "B"]);
        assert_eq!(h.panel("B").status(), DockStatus::Dragged);
        h.frame(held_at(target, target - grab), &["A", "B"]);
        assert_eq!(h.panel("B").status(), DockStatus::Dragged);
    }

    #[test]
    fn drop_on_panel_slot_docks() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);

        // Right slot of A spans x 430..450 around the centre (400, 300).
        let target = Vec2::new(440.0, 300.0);
        drag_b_to(&mut h, target);
        h.frame(released_at(target), &["A", "B"]);

        assert_eq!(h.panel("B").status(), DockStatus::Docked);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 600.0)));
    }

    #[test]
    fn drop_on_panel_centre_tabs() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);

        let target = Vec2::new(400.0, 300.0);
        drag_b_to(&mut h, target);
        h.frame(released_at(target), &["A", "B"]);

        assert_eq!(h.ctx.registry().tab_group(h.idx("A")), vec![h.idx("A"), h.idx("B")]);
        assert!(h.panel("B").is_active());
    }

    #[test]
    fn drop_elsewhere_floats_at_pointer() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);

        let target = Vec2::new(200.0, 100.0);
        drag_b_to(&mut h, target);
        h.frame(released_at(target), &["A", "B"]);

        let b = h.panel("B");
        assert_eq!(b.status(), DockStatus::Float);
        assert!(b.location().is_empty());
        assert_eq!(b.pos(), Vec2::new(-100.0, 95.0));
    }

    #[test]
    fn drag_draws_slots_and_ghost() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        drag_b_to(&mut h, Vec2::new(200.0, 100.0));

        // The overlay is balanced and the ghost follows the pointer.
        assert_eq!(h.ui.draw_list().clip_depth(), 0);
        assert_eq!(h.panel("B").pos(), Vec2::new(-100.0, 95.0));
    }

    #[test]
    fn shared_edge_belongs_to_the_second_leaf() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);

        assert_eq!(h.ctx.dock_at(Vec2::new(400.0, 300.0)), Some(h.idx("B")));
        assert_eq!(h.ctx.dock_at(Vec2::new(399.5, 300.0)), Some(h.idx("A")));
        assert_eq!(h.ctx.dock_at(Vec2::new(800.0, 300.0)), None);
    }

    #[test]
    fn slot_geometry() {
        let config = DockConfig::default();
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);

        assert_eq!(slot_rect(rect, DockSlot::Right, &config), Rect::new(430.0, 280.0, 20.0, 40.0));
        assert_eq!(slot_rect(rect, DockSlot::Top, &config), Rect::new(380.0, 250.0, 40.0, 20.0));
        assert_eq!(slot_rect(rect, DockSlot::Tab, &config), Rect::new(380.0, 280.0, 40.0, 40.0));
        assert_eq!(
            slot_rect_on_border(rect, DockSlot::Top, &config),
            Some(Rect::new(380.0, 10.0, 40.0, 20.0))
        );
        assert_eq!(
            slot_rect_on_border(rect, DockSlot::Right, &config),
            Some(Rect::new(770.0, 280.0, 20.0, 40.0))
        );
        assert_eq!(slot_rect_on_border(rect, DockSlot::Tab, &config), None);
        assert_eq!(docked_rect(rect, DockSlot::Left), Rect::new(0.0, 0.0, 400.0, 600.0));
        assert_eq!(docked_rect(rect, DockSlot::Bottom), Rect::new(0.0, 300.0, 800.0, 300.0));
    }

    // ──────────────────────────────────────────
    // Location paths
    // ──────────────────────────────────────────

    /// A frame showing A and B, and C under the host flag `open_c`.
    fn show_abc(h: &mut Harness, open_c: &mut bool) {
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            show(ctx, ui, "B", None);
            show(ctx, ui, "C", Some(open_c));
        });
    }

    #[test]
    fn location_path_parses_digits() {
        let path: LocationPath = "30".parse().expect("valid path");
        assert_eq!(path.codes(), &[SideCode::VerticalSecond, SideCode::HorizontalSecond]);
        assert_eq!(path.to_string(), "30");
        assert_eq!("3x".parse::<LocationPath>(), Err('x'));
        assert_eq!(SideCode::HorizontalFirst.slot(), DockSlot::Left);
        assert_eq!(SideCode::HorizontalSecond.slot(), DockSlot::Right);
    }

    #[test]
    fn closed_panel_returns_to_nested_location() {
        let mut h = Harness::new();
        let mut open_c = true;
        show_abc(&mut h, &mut open_c);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Bottom);

        open_c = false;
        show_abc(&mut h, &mut open_c);
        assert_eq!(h.panel("C").location().to_string(), "30");
        assert_eq!(h.panel("C").status(), DockStatus::Float);
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 600.0)));

        open_c = true;
        show_abc(&mut h, &mut open_c);
        assert_eq!(h.panel("C").status(), DockStatus::Docked);
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(400.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&h.rect("C"), &Rect::new(400.0, 300.0, 400.0, 300.0)));
    }

    #[test]
    fn closed_tab_returns_to_its_group() {
        let mut h = Harness::new();
        let mut open_c = true;
        show_abc(&mut h, &mut open_c);
        h.dock("B", "A", DockSlot::Right);
        h.dock("C", "B", DockSlot::Tab);

        open_c = false;
        show_abc(&mut h, &mut open_c);
        assert_eq!(h.panel("C").location().to_string(), "0");

        open_c = true;
        show_abc(&mut h, &mut open_c);
        assert_eq!(h.ctx.registry().tab_group(h.idx("B")), vec![h.idx("B"), h.idx("C")]);
    }

    // ──────────────────────────────────────────
    // Liveness and hints
    // ──────────────────────────────────────────

    #[test]
    fn unseen_docked_panel_floats_after_three_frames() {
        let mut h = Harness::new();
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            ctx.set_next_dock_slot(DockSlot::Right);
            show(ctx, ui, "B", None);
        });
        assert_eq!(h.panel("B").status(), DockStatus::Docked);

        for missed in 1..=2 {
            h.frame(idle(), &["A"]);
            assert_eq!(h.panel("B").status(), DockStatus::Docked);
            assert_eq!(h.panel("B").missed_frames(), missed);
        }

        h.frame(idle(), &["A"]);
        assert_eq!(h.panel("B").status(), DockStatus::Float);
        assert_eq!(h.panel("A").parent(), None);
        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn panels_begun_every_frame_stay_docked() {
        let mut h = Harness::new();
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            ctx.set_next_dock_slot(DockSlot::Right);
            show(ctx, ui, "B", None);
        });

        for _ in 0..5 {
            h.frame(idle(), &["A", "B"]);
        }
        assert_eq!(h.panel("B").status(), DockStatus::Docked);
        assert_eq!(h.panel("B").missed_frames(), 0);
        assert_eq!(h.panel("A").parent(), h.panel("B").parent());
    }

    #[test]
    fn dock_slot_hint_applies_once() {
        let mut h = Harness::new();
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            ctx.set_next_dock_slot(DockSlot::Bottom);
            show(ctx, ui, "B", None);
            show(ctx, ui, "C", None);
        });

        assert!(rect_approx_eq(&h.rect("A"), &Rect::new(0.0, 0.0, 800.0, 300.0)));
        assert!(rect_approx_eq(&h.rect("B"), &Rect::new(0.0, 300.0, 800.0, 300.0)));
        assert_eq!(h.panel("C").status(), DockStatus::Float);
    }

    #[test]
    fn tab_hint_joins_preferred_parent() {
        let mut h = Harness::new();
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            ctx.set_next_dock_slot(DockSlot::Tab);
            show(ctx, ui, "B", None);
        });
        assert_eq!(h.ctx.registry().tab_group(h.idx("A")), vec![h.idx("A"), h.idx("B")]);
    }

    // ──────────────────────────────────────────
    // Host surface
    // ──────────────────────────────────────────

    #[test]
    fn unmatched_end_panel_is_ignored() {
        let mut h = Harness::new();
        h.frame_with(idle(), |ctx, ui| {
            show(ctx, ui, "A", None);
            ctx.end_panel(ui);
        });
        assert_eq!(h.ctx.registry().len(), 1);
    }

    #[test]
    fn set_dock_active_targets_current_panel() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Tab);

        h.frame_with(idle(), |ctx, ui| {
            ctx.begin_panel(ui, "A", None, WindowFlags::empty());
            ctx.set_dock_active();
            ctx.end_panel(ui);
        });
        assert!(h.panel("A").is_active());
        assert!(!h.panel("B").is_active());
    }

    #[test]
    fn debug_view_lists_records() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);

        h.ui.begin_frame_at(IDLE);
        h.ctx.debug_view(&mut h.ui);
        let lines = h.ui.text_lines();
        assert!(lines.iter().any(|l| l == "Dock 0 (A)"));
        assert!(lines.iter().any(|l| l == "is_container = true"));
        assert!(lines.iter().any(|l| l == "parent = -1"));
        assert_eq!(h.ui.scope_depth(), 0);
    }

    #[test]
    fn snapshot_serializes() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.dock("B", "A", DockSlot::Right);

        let snapshot = h.ctx.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot[2].is_container);
        assert_eq!(snapshot[2].split, Some(SplitDirection::Horizontal));
        assert_eq!(snapshot[0].split, None);

        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(json[0]["label"], "A");
        assert_eq!(json[0]["status"], "Docked");
        assert_eq!(json[1]["parent"], 2);
        assert_eq!(json[1]["location"], "");
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: DockConfig =
            serde_json::from_str(r#"{ "max_missed_frames": 5, "splitter_thickness": 4.0 }"#)
                .expect("parse config");
        assert_eq!(config.max_missed_frames, 5);
        assert!(approx_eq(config.splitter_thickness, 4.0));
        assert_eq!(config.max_location_depth, 15);
        assert_eq!(config.min_leaf_size, Size::new(16.0, 16.0));
    }

    #[test]
    fn shutdown_clears_registry() {
        let mut h = Harness::new();
        h.frame(idle(), &["A", "B"]);
        h.ctx.shutdown();
        assert!(h.ctx.registry().is_empty());
        assert_eq!(h.ctx.root_dock(), None);
    }

    // ──────────────────────────────────────────
    // Layout invariants under random docking
    // ──────────────────────────────────────────

    const LABELS: [&str; 6] = ["P0", "P1", "P2", "P3", "P4", "P5"];

    #[derive(Debug, Clone)]
    enum LayoutStep {
        Dock { panel: usize, dest: usize, slot: DockSlot },
        Undock { panel: usize },
    }

    fn arb_slot() -> impl Strategy<Value = DockSlot> {
        prop_oneof![
            Just(DockSlot::Left),
            Just(DockSlot::Right),
            Just(DockSlot::Top),
            Just(DockSlot::Bottom),
            Just(DockSlot::Tab),
        ]
    }

    fn arb_step() -> impl Strategy<Value = LayoutStep> {
        prop_oneof![
            3 => (0..LABELS.len(), 0..LABELS.len(), arb_slot())
                .prop_map(|(panel, dest, slot)| LayoutStep::Dock { panel, dest, slot }),
            1 => (0..LABELS.len()).prop_map(|panel| LayoutStep::Undock { panel }),
        ]
    }

    impl Harness {
        fn is_docked(&self, label: &str) -> bool {
            self.panel(label).status() == DockStatus::Docked
        }

        fn float(&mut self, label: &str) {
            let index = self.idx(label);
            self.ctx.undock(index);
            self.ctx.registry[index].status = DockStatus::Float;
        }

        /// Apply one step the way the interaction would: a docked panel is
        /// floated before it moves, and it only docks onto a docked panel or
        /// into an empty workspace.
        fn apply(&mut self, step: &LayoutStep) {
            match *step {
                LayoutStep::Undock { panel } => {
                    if self.is_docked(LABELS[panel]) {
                        self.float(LABELS[panel]);
                    }
                }
                LayoutStep::Dock { panel, dest, slot } => {
                    if self.is_docked(LABELS[panel]) {
                        self.float(LABELS[panel]);
                    }
                    if panel == dest {
                        return;
                    }
                    if self.is_docked(LABELS[dest]) {
                        self.dock(LABELS[panel], LABELS[dest], slot);
                    } else if self.ctx.root_dock().is_none() {
                        let index = self.idx(LABELS[panel]);
                        self.ctx.dock(index, None, slot);
                    }
                }
            }
        }
    }

    fn check_layout(h: &Harness) -> Result<(), TestCaseError> {
        let registry = h.ctx.registry();
        let leaf_min = h.ctx.leaf_min_size();
        let mut roots = 0;

        for (index, p) in registry.iter() {
            if registry.is_docked_root(index) {
                roots += 1;
                prop_assert_eq!(p.pos(), h.ctx.workspace().pos());
            }

            if p.is_container() {
                prop_assert_eq!(p.prev_tab(), None, "split {} is in a tab group", index);
                prop_assert_eq!(p.next_tab(), None, "split {} is in a tab group", index);
                let [Some(a), Some(b)] = p.children() else {
                    return Err(TestCaseError::fail(format!("split {index} lacks a child")));
                };
                let (first, second) = (&registry[a], &registry[b]);
                prop_assert_eq!(first.parent(), Some(index));
                prop_assert_eq!(second.parent(), Some(index));
                prop_assert_eq!(first.pos(), p.pos());
                if registry.is_horizontal(index) {
                    prop_assert!(approx_eq(first.size().width + second.size().width, p.size().width));
                    prop_assert!(approx_eq(second.pos().x, p.pos().x + first.size().width));
                    prop_assert!(approx_eq(second.pos().y, p.pos().y));
                    prop_assert!(approx_eq(first.size().height, p.size().height));
                    prop_assert!(approx_eq(second.size().height, p.size().height));
                } else {
                    prop_assert!(approx_eq(first.size().height + second.size().height, p.size().height));
                    prop_assert!(approx_eq(second.pos().y, p.pos().y + first.size().height));
                    prop_assert!(approx_eq(second.pos().x, p.pos().x));
                    prop_assert!(approx_eq(first.size().width, p.size().width));
                    prop_assert!(approx_eq(second.size().width, p.size().width));
                }
                continue;
            }

            if p.status() != DockStatus::Docked {
                continue;
            }
            prop_assert!(
                p.size().width >= leaf_min.width - 0.01 && p.size().height >= leaf_min.height - 0.01,
                "{} is {:?}, below the leaf minimum",
                p.label(),
                p.size()
            );
            if p.prev_tab().is_none() {
                let group = registry.tab_group(index);
                let active = group.iter().filter(|&&t| registry[t].is_active()).count();
                prop_assert_eq!(active, 1, "group of {} has {} active tabs", p.label(), active);
                for &tab in &group {
                    let t = &registry[tab];
                    prop_assert!(!t.is_container());
                    prop_assert_eq!(t.status(), DockStatus::Docked);
                    prop_assert_eq!(t.rect(), p.rect());
                    prop_assert_eq!(t.parent(), p.parent());
                }
            }
        }

        let any_docked = registry.iter().any(|(_, p)| p.status() == DockStatus::Docked);
        prop_assert_eq!(roots, usize::from(any_docked));
        Ok(())
    }

    proptest! {
        #[test]
        fn random_docking_keeps_layout_consistent(
            steps in prop::collection::vec(arb_step(), 1..40),
        ) {
            let mut h = Harness::new();
            h.frame(idle(), &LABELS);
            check_layout(&h)?;

            for step in &steps {
                h.apply(step);
                h.frame(idle(), &LABELS);
                check_layout(&h)?;
            }
        }
    }
}
