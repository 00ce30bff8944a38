use super::*;
use crate::geom2::{intersect, Point, Rect, SlantCfg};
use nalgebra::vector;
use proptest::prelude::*;

fn square() -> Rect {
    Rect::from_size(100.0, 100.0)
}

fn build(template: &LayoutTemplate) -> Mesh {
    Mesh::build(template, square(), SlantCfg::default()).unwrap()
}

fn close(a: Point, b: Point) -> bool {
    (a - b).norm() < 1e-9
}

/// Every interior endpoint equals the intersection with its attachment.
fn assert_endpoints_on_attachments(mesh: &Mesh) {
    let eps = mesh.cfg().eps_det;
    for line in mesh.lines() {
        let s_id = line
            .attach_start
            .unwrap_or_else(|| line.direction.start_side().line_id());
        let e_id = line
            .attach_end
            .unwrap_or_else(|| line.direction.end_side().line_id());
        let s = mesh.line(s_id).unwrap();
        let e = mesh.line(e_id).unwrap();
        let want_s = intersect(line.start, line.end, s.start, s.end, eps).unwrap();
        let want_e = intersect(line.start, line.end, e.start, e.end, eps).unwrap();
        assert!(close(line.start, want_s), "{line} start vs {want_s:?}");
        assert!(close(line.end, want_e), "{line} end vs {want_e:?}");
    }
}

#[test]
fn endpoints_match_attachments_after_build_and_drag() {
    let mut mesh = build(&LayoutTemplate::slant_rows(&[2, 3, 1], 0.5));
    assert_endpoints_on_attachments(&mesh);
    let h = LineId::interior(0);
    mesh.prepare_move(h);
    mesh.move_line(h, 7.5);
    assert_endpoints_on_attachments(&mesh);
}

#[test]
fn update_is_idempotent() {
    let mut mesh = build(&LayoutTemplate::slant_columns(&[3, 2], 0.4));
    let before: Vec<Line> = mesh.lines().to_vec();
    mesh.update();
    mesh.update();
    for (a, b) in before.iter().zip(mesh.lines()) {
        assert!(close(a.start, b.start) && close(a.end, b.end));
    }
}

#[test]
fn update_order_resolves_attachments_first() {
    let mesh = build(&LayoutTemplate::rows(&[2, 2, 2]));
    let order = mesh.update_order();
    let pos = |id: LineId| order.iter().position(|&x| x == id).unwrap();
    for (k, line) in mesh.lines().iter().enumerate() {
        let id = LineId::interior(k);
        for dep in [line.attach_start, line.attach_end].into_iter().flatten() {
            assert!(pos(dep) < pos(id));
        }
    }
}

#[test]
fn update_order_follows_attachments_not_arena_order() {
    // Dependents listed first: 0 hangs off 1, 1 hangs off 2.
    let template = LayoutTemplate {
        lines: vec![
            LineSpec {
                attach_end: Some(1),
                ..LineSpec::straight(Direction::Vertical, 0.7)
            },
            LineSpec {
                attach_start: Some(2),
                ..LineSpec::straight(Direction::Horizontal, 0.5)
            },
            LineSpec::straight(Direction::Vertical, 0.3),
        ],
        areas: Vec::new(),
    };
    let mut mesh = build(&template);
    assert_eq!(
        mesh.update_order(),
        &[LineId::interior(2), LineId::interior(1), LineId::interior(0)][..]
    );
    assert_endpoints_on_attachments(&mesh);
    assert!(close(mesh.line(LineId::interior(1)).unwrap().start, vector![30.0, 50.0]));
    assert!(close(mesh.line(LineId::interior(0)).unwrap().end, vector![70.0, 50.0]));

    let v = LineId::interior(2);
    mesh.prepare_move(v);
    assert_eq!(mesh.move_line(v, 10.0), 10.0);
    assert_endpoints_on_attachments(&mesh);
    assert!(close(mesh.line(LineId::interior(1)).unwrap().start, vector![40.0, 50.0]));
}

#[test]
fn grid_drag_moves_horizontal_endpoints_only() {
    // 2×2: one horizontal, one vertical, crossing.
    let mut mesh = build(&LayoutTemplate::grid(2, 2));
    let outer_before: Vec<Line> = mesh.outer_lines().to_vec();
    let h = LineId::interior(0);
    let v = LineId::interior(1);
    let h0 = mesh.line(h).unwrap().clone();
    let v0 = mesh.line(v).unwrap().clone();
    assert!(close(h0.start, vector![0.0, 50.0]) && close(h0.end, vector![100.0, 50.0]));

    mesh.prepare_move(h);
    let applied = mesh.move_line(h, 20.0);
    assert_eq!(applied, 20.0);

    let h1 = mesh.line(h).unwrap();
    assert!(close(h1.start, h0.start + vector![0.0, 20.0]));
    assert!(close(h1.end, h0.end + vector![0.0, 20.0]));
    // the crossing vertical keeps its endpoints; its crossing point moved
    let v1 = mesh.line(v).unwrap();
    assert!(close(v1.start, v0.start) && close(v1.end, v0.end));
    let top_left = mesh.area(0).unwrap();
    assert!(close(top_left.points[2], vector![50.0, 70.0]));
    assert_eq!(mesh.outer_lines(), &outer_before[..]);
}

#[test]
fn band_drag_moves_attached_vertical_endpoints() {
    let mut mesh = build(&LayoutTemplate::rows(&[2, 2]));
    let h = LineId::interior(0);
    let upper = LineId::interior(1);
    let lower = LineId::interior(2);
    let up0 = mesh.line(upper).unwrap().clone();
    let lo0 = mesh.line(lower).unwrap().clone();
    mesh.prepare_move(h);
    mesh.move_line(h, 20.0);
    let up1 = mesh.line(upper).unwrap();
    let lo1 = mesh.line(lower).unwrap();
    assert!(close(up1.start, up0.start));
    assert!(close(up1.end, up0.end + vector![0.0, 20.0]));
    assert!(close(lo1.start, lo0.start + vector![0.0, 20.0]));
    assert!(close(lo1.end, lo0.end));
}

#[test]
fn repeated_cumulative_offsets_do_not_drift() {
    let mut mesh = build(&LayoutTemplate::slant_rows(&[2, 2], 0.3));
    let h = LineId::interior(0);
    mesh.prepare_move(h);
    for _ in 0..25 {
        mesh.move_line(h, 5.0);
    }
    let once = {
        let mut m = build(&LayoutTemplate::slant_rows(&[2, 2], 0.3));
        m.prepare_move(h);
        m.move_line(h, 5.0);
        m
    };
    for (a, b) in mesh.lines().iter().zip(once.lines()) {
        assert!(close(a.start, b.start) && close(a.end, b.end));
    }
}

#[test]
fn drag_past_boundary_clamps() {
    let cfg = SlantCfg::default();
    let mut mesh = build(&LayoutTemplate::grid(2, 2));
    let h = LineId::interior(0);
    mesh.prepare_move(h);
    let applied = mesh.move_line(h, 500.0);
    assert!(applied > 0.0 && applied < 50.0);
    let y = mesh.line(h).unwrap().start.y;
    assert!(y <= 100.0 - cfg.min_cell_extent + 1e-6);
    assert!(y > 100.0 - cfg.min_cell_extent - 1e-3);
    for area in mesh.areas() {
        assert!(area.signed_area() > 0.0);
        assert!(area.is_valid(cfg.min_cell_extent - 1e-6, 0.0));
    }
    // and upward past the top
    let applied = mesh.move_line(h, -500.0);
    assert!(applied < 0.0 && applied > -50.0);
    assert!(mesh.line(h).unwrap().start.y >= cfg.min_cell_extent - 1e-6);

    // huge offsets still stop at the floor instead of staying put
    for (offset, floor_y) in [(1e15, 100.0 - cfg.min_cell_extent), (-1e15, cfg.min_cell_extent)] {
        let applied = mesh.move_line(h, offset);
        assert!(applied.signum() == offset.signum());
        let y = mesh.line(h).unwrap().start.y;
        assert!((y - floor_y).abs() < 1e-3, "offset {offset}: y = {y}");
    }
    let v = LineId::interior(1);
    mesh.prepare_move(v);
    mesh.move_line(v, f64::MAX);
    assert!((mesh.line(v).unwrap().start.x - (100.0 - cfg.min_cell_extent)).abs() < 1e-3);
}

#[test]
fn slanted_drag_never_inverts_cells() {
    let mut mesh = build(&LayoutTemplate::slant_rows(&[3, 2, 3], 0.8));
    for k in 0..mesh.lines().len() {
        let id = LineId::interior(k);
        for offset in [-300.0, -40.0, 40.0, 300.0] {
            mesh.prepare_move(id);
            mesh.move_line(id, offset);
            for area in mesh.areas() {
                assert!(area.signed_area() > 0.0, "area {} inverted", area.index);
                assert!(area.is_valid(0.0, 0.0));
            }
            mesh.finish_move();
        }
    }
}

#[test]
fn outer_lines_never_move() {
    let mut mesh = build(&LayoutTemplate::grid(2, 2));
    let before = mesh.outer_lines().to_vec();
    mesh.prepare_move(Side::Top.line_id());
    assert_eq!(mesh.move_line(Side::Top.line_id(), 10.0), 0.0);
    assert_eq!(mesh.move_line(LineId(99), 10.0), 0.0);
    assert_eq!(mesh.outer_lines(), &before[..]);
}

#[test]
fn line_near_hits_interior_only() {
    let mesh = build(&LayoutTemplate::grid(2, 2));
    assert_eq!(
        mesh.line_near(vector![20.0, 55.0], 10.0),
        Some(LineId::interior(0))
    );
    assert_eq!(
        mesh.line_near(vector![45.0, 20.0], 10.0),
        Some(LineId::interior(1))
    );
    // near the outer left line but no interior line
    assert_eq!(mesh.line_near(vector![1.0, 20.0], 10.0), None);
    assert_eq!(mesh.line_near(vector![500.0, 500.0], 10.0), None);
}

#[test]
fn area_containment_and_touches() {
    let mesh = build(&LayoutTemplate::slant_rows(&[2, 2], 0.5));
    let areas = mesh.areas();
    assert_eq!(areas.len(), 4);
    for area in &areas {
        assert!(area.contains_point(area.centroid()));
        assert!(!area.contains_point(vector![-1000.0, 1000.0]));
        assert!(area.touches(area.bounds.left));
        assert!(area.touches(area.bounds.bottom));
    }
    let h = LineId::interior(0);
    let touching: Vec<usize> = areas
        .iter()
        .filter(|a| a.touches(h))
        .map(|a| a.index)
        .collect();
    assert_eq!(touching, vec![0, 1, 2, 3]);
    let v_top = LineId::interior(1);
    let touching: Vec<usize> = areas
        .iter()
        .filter(|a| a.touches(v_top))
        .map(|a| a.index)
        .collect();
    assert_eq!(touching, vec![0, 1]);
}

#[test]
fn areas_tile_the_boundary() {
    let mesh = build(&LayoutTemplate::slant_columns(&[2, 3, 1], 0.7));
    let total: f64 = mesh.areas().iter().map(Area::signed_area).sum();
    assert!((total - 100.0 * 100.0).abs() < 1e-6);
}

#[test]
fn reset_then_build_is_bit_identical() {
    let template = LayoutTemplate::slant_rows(&[2, 3], 0.6);
    let fresh = build(&template);
    let mut mesh = build(&template);
    mesh.prepare_move(LineId::interior(0));
    mesh.move_line(LineId::interior(0), 13.0);
    mesh.reset();
    assert!(mesh.is_empty());
    assert_eq!(mesh.area_count(), 0);
    assert!(mesh.areas().is_empty());
    assert!(mesh.outer_lines().is_empty());
    mesh.load(&template).unwrap();
    assert_eq!(mesh.lines(), fresh.lines());
    assert_eq!(mesh.outer_lines(), fresh.outer_lines());
}

#[test]
fn resize_relayouts_from_ratios() {
    let template = LayoutTemplate::grid(2, 2);
    let mut mesh = build(&template);
    mesh.prepare_move(LineId::interior(0));
    mesh.move_line(LineId::interior(0), 10.0);
    mesh.set_outer_boundary(Rect::new(10.0, 20.0, 210.0, 120.0))
        .unwrap();
    mesh.layout();
    let h = mesh.line(LineId::interior(0)).unwrap();
    assert!(close(h.start, vector![10.0, 70.0]));
    assert!(close(h.end, vector![210.0, 70.0]));
    let left = &mesh.outer_lines()[0];
    assert!(close(left.start, vector![10.0, 20.0]) && close(left.end, vector![10.0, 120.0]));
}

#[test]
fn degenerate_boundary_is_rejected() {
    let err = Mesh::build(
        &LayoutTemplate::grid(2, 2),
        Rect::from_size(0.0, 50.0),
        SlantCfg::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        crate::error::LayoutError::DegenerateBoundary { .. }
    ));
    let mut mesh = build(&LayoutTemplate::grid(2, 2));
    assert!(mesh
        .set_outer_boundary(Rect::new(0.0, 0.0, f64::NAN, 1.0))
        .is_err());
    assert_eq!(mesh.outer(), square());
}

#[test]
fn contains_point_uses_family_band() {
    let line = Line::new(vector![0.0, 10.0], vector![100.0, 30.0], Direction::Horizontal);
    assert!(line.contains_point(vector![50.0, 24.0], 5.0));
    assert!(!line.contains_point(vector![50.0, 26.0], 5.0));
    assert!(!line.contains_point(vector![101.0, 30.0], 5.0));
    assert!(!line.contains_point(vector![50.0, 20.0], 0.0));
    let v = Line::new(vector![40.0, 0.0], vector![60.0, 100.0], Direction::Vertical);
    assert!(v.contains_point(vector![52.0, 50.0], 3.0));
    assert!(!v.contains_point(vector![54.0, 50.0], 3.0));
    assert!((v.length() - (20.0f64.powi(2) + 100.0f64.powi(2)).sqrt()).abs() < 1e-12);
}

proptest! {
    #[test]
    fn segment_points_hit_their_line(
        t in 0.0f64..=1.0,
        tol in 0.01f64..30.0,
        sx in -50.0f64..50.0, sy in -50.0f64..50.0,
        dx in 1.0f64..200.0, dy in -80.0f64..80.0,
        vertical in any::<bool>(),
    ) {
        let (start, end, direction) = if vertical {
            (vector![sx, sy], vector![sx + dy, sy + dx], Direction::Vertical)
        } else {
            (vector![sx, sy], vector![sx + dx, sy + dy], Direction::Horizontal)
        };
        let line = Line::new(start, end, direction);
        let p = start + (end - start) * t;
        prop_assert!(line.contains_point(p, tol));
    }

    #[test]
    fn random_drags_keep_mesh_consistent(
        counts in prop::collection::vec(1usize..4, 1..4),
        slant in 0.0f64..0.9,
        columns in any::<bool>(),
        pick in 0usize..64,
        offset in -200.0f64..200.0,
    ) {
        let template = if columns {
            LayoutTemplate::slant_columns(&counts, slant)
        } else {
            LayoutTemplate::slant_rows(&counts, slant)
        };
        let mut mesh = build(&template);
        prop_assume!(!mesh.lines().is_empty());
        let id = LineId::interior(pick % mesh.lines().len());
        mesh.prepare_move(id);
        let applied = mesh.move_line(id, offset);
        prop_assert!(applied.abs() <= offset.abs() + 1e-12);
        prop_assert!(applied == 0.0 || applied.signum() == offset.signum());
        assert_endpoints_on_attachments(&mesh);
        for area in mesh.areas() {
            prop_assert!(area.is_valid(0.0, 0.0));
            prop_assert!(area.contains_point(area.centroid()));
        }
    }
}
