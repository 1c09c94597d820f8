use super::*;
use crate::influence::FrameCtx;

fn cell_at(x: f64, y: f64) -> Cell {
    Cell::new(x, y, 10.0, &[Color::rgb(255, 255, 255)], 1, 0)
}

fn plain(deactivate: f64, displace: f64, jitter: f64) -> ReactiveParams<'static> {
    ReactiveParams {
        deactivate,
        displace,
        jitter,
        palette: &[],
    }
}

#[test]
fn scope_policies() {
    assert!(should_affect_cell(InteractionScope::All, 0.0, 0.0));
    assert!(!should_affect_cell(InteractionScope::ActiveOnly, 0.0005, 1.0));
    assert!(should_affect_cell(InteractionScope::ActiveOnly, 0.01, 0.0));
    assert!(!should_affect_cell(InteractionScope::ImageMask, 10.0, 0.05));
    assert!(should_affect_cell(InteractionScope::ImageMask, 0.0, 0.06));
}

#[test]
fn deactivate_scales_target_and_floors_at_zero() {
    let mut cell = cell_at(0.0, 0.0);
    cell.target_size = 8.0;
    apply_to_cell(&mut cell, 0, 0.5, Point::new(0.0, 0.0), 0.0, &plain(0.8, 0.0, 0.0));
    assert!((cell.target_size - 4.8).abs() < 1e-12);

    apply_to_cell(&mut cell, 0, 1.0, Point::new(0.0, 0.0), 0.0, &plain(2.0, 0.0, 0.0));
    assert_eq!(cell.target_size, 0.0);
}

#[test]
fn displace_pushes_away_from_origin() {
    let mut cell = cell_at(30.0, 0.0);
    apply_to_cell(&mut cell, 0, 1.0, Point::new(0.0, 0.0), 0.0, &plain(0.0, 3.0, 0.0));
    assert!((cell.offset_x - 3.0).abs() < 1e-12);
    assert_eq!(cell.offset_y, 0.0);
}

#[test]
fn jitter_is_deterministic_for_equal_time() {
    let mut a = cell_at(10.0, 10.0);
    let mut b = cell_at(10.0, 10.0);
    let params = plain(0.0, 1.0, 1.25);
    apply_to_cell(&mut a, 7, 0.6, Point::new(0.0, 0.0), 480.0, &params);
    apply_to_cell(&mut b, 7, 0.6, Point::new(0.0, 0.0), 480.0, &params);
    assert_eq!((a.offset_x, a.offset_y), (b.offset_x, b.offset_y));

    let mut c = cell_at(10.0, 10.0);
    apply_to_cell(&mut c, 7, 0.6, Point::new(0.0, 0.0), 1480.0, &params);
    assert_ne!(a.offset_x, c.offset_x);
}

#[test]
fn tint_indexes_palette_by_strength() {
    let palette = [Color::rgb(1, 0, 0), Color::rgb(2, 0, 0), Color::rgb(3, 0, 0)];
    let params = ReactiveParams {
        palette: &palette,
        ..plain(0.0, 0.0, 0.0)
    };
    for (s, expected) in [(0.1, 0), (0.5, 1), (0.9, 2), (5.0, 2)] {
        let mut cell = cell_at(0.0, 0.0);
        apply_to_cell(&mut cell, 0, s, Point::new(0.0, 0.0), 0.0, &params);
        assert_eq!(cell.color, palette[expected], "strength {s}");
    }
}

#[test]
fn non_positive_or_nan_interaction_is_ignored() {
    for s in [0.0, -1.0, f64::NAN] {
        let mut cell = cell_at(5.0, 5.0);
        cell.target_size = 4.0;
        apply_to_cell(&mut cell, 0, s, Point::new(0.0, 0.0), 0.0, &plain(0.8, 3.0, 1.0));
        assert_eq!(cell.target_size, 4.0);
        assert_eq!((cell.offset_x, cell.offset_y), (0.0, 0.0));
    }
}

#[test]
fn ripple_palette_falls_back_to_hover() {
    let hover = HoverEffects {
        tint_palette: vec![Color::rgb(7, 7, 7)],
        ..HoverEffects::default()
    };
    let ripple = RippleEffects {
        deactivate_multiplier: 0.5,
        ..RippleEffects::default()
    };
    let params = ReactiveParams::ripple(&hover, &ripple);
    assert_eq!(params.palette, &[Color::rgb(7, 7, 7)]);
    assert!((params.deactivate - 0.4).abs() < 1e-12);
}

#[test]
fn hover_pass_only_touches_cells_under_pointer() {
    let layout = GridLayout::new(100, 10, 10.0);
    let mut cells: Vec<Cell> = (0..layout.columns())
        .map(|c| {
            let mut cell = cell_at(layout.position(c, 0).0, 0.0);
            cell.target_size = 5.0;
            cell
        })
        .collect();
    let hover = HoverEffects {
        radius: 25.0,
        interaction_scope: InteractionScope::All,
        ..HoverEffects::default()
    };
    let weights = vec![0.0; cells.len()];

    apply_hover_pass(&mut cells, &PointerState::at(0.0, 0.0), &hover, &weights, 0.0);
    assert!(cells[0].target_size < 5.0);
    assert!(cells[1].target_size < 5.0);
    assert_eq!(cells[5].target_size, 5.0);

    let before: Vec<f64> = cells.iter().map(|c| c.target_size).collect();
    apply_hover_pass(&mut cells, &PointerState::outside(), &hover, &weights, 0.0);
    assert_eq!(cells.iter().map(|c| c.target_size).collect::<Vec<_>>(), before);
}

#[test]
fn ripple_pass_respects_mask_scope() {
    let layout = GridLayout::new(100, 10, 10.0);
    let mut cells: Vec<Cell> = (0..layout.columns())
        .map(|c| {
            let mut cell = cell_at(layout.position(c, 0).0, 0.0);
            cell.target_size = 5.0;
            cell
        })
        .collect();
    let mut ripple = RippleInfluence::new(0.0, 0.0, 1.0, 15.0, 1.0, 500.0);
    ripple.update(&FrameCtx::with_dt(30.0));

    // Cells 2, 3, 4 sit on the ring; only cell 3 is inside the mask.
    let mut weights = vec![0.0; cells.len()];
    weights[3] = 1.0;

    apply_ripple_pass(
        &layout,
        &mut cells,
        [&ripple],
        &HoverEffects::default(),
        &RippleEffects::default(),
        &weights,
        0.0,
    );
    assert!(cells[3].target_size < 5.0);
    assert_eq!(cells[2].target_size, 5.0);
    assert_eq!(cells[4].target_size, 5.0);
}
