use super::*;
use crate::{
    config::model::Breathing,
    foundation::core::Color,
    grid::layout::GridLayout,
    influence::mask::MaskKind,
    mask::{handle::MaskHandle, raster::MaskRaster},
};

fn cells() -> Vec<Cell> {
    let layout = GridLayout::new(40, 40, 10.0);
    let palette = [Color::rgb(0, 0, 0)];
    let mut out = Vec::new();
    for col in 0..layout.columns() {
        for row in 0..layout.rows() {
            let (x, y) = layout.position(col, row);
            out.push(Cell::new(x, y, 10.0, &palette, 1, layout.index(col, row)));
        }
    }
    out
}

/// 20x20 mask covering cells with x, y in {0, 10}.
fn corner_mask(kind: MaskKind, value: f64) -> MaskInfluence {
    let handle = MaskHandle::ready(MaskRaster::filled(20, 20, value));
    MaskInfluence::new(kind, 10.0, 10.0, 1.5, handle)
}

#[test]
fn recompute_takes_max_of_text_and_morph() {
    let cells = cells();
    let image = corner_mask(MaskKind::Image, 0.4);
    let text = corner_mask(MaskKind::Text, 0.7);
    let sources = MaskSources {
        image: Some(&image),
        text: Some(&text),
        morph: None,
    };

    let mut cache = MaskWeightCache::new(cells.len());
    assert!(cache.should_recompute(true, &sources));
    cache.recompute(&cells, &sources);

    // Cell (0, 0) is index 0; cell (3, 3) is outside the mask.
    assert_eq!(cache.image()[0], 0.4);
    assert_eq!(cache.text()[0], 0.7);
    assert_eq!(cache.active()[0], 0.7);
    assert_eq!(cache.active()[15], 0.0);
    assert!(!cache.is_zeroed());
}

#[test]
fn removing_sources_zeroes_once_and_stays_quiet() {
    let cells = cells();
    let image = corner_mask(MaskKind::Image, 1.0);
    let mut cache = MaskWeightCache::new(cells.len());
    let sources = MaskSources {
        image: Some(&image),
        ..MaskSources::default()
    };
    cache.recompute(&cells, &sources);
    assert!(cache.active().iter().any(|&w| w > 0.0));

    let none = MaskSources::default();
    assert!(!cache.should_recompute(true, &none));
    assert!(cache.is_zeroed());
    assert!(cache.image().iter().chain(cache.text()).chain(cache.active()).all(|&w| w == 0.0));

    for _ in 0..5 {
        assert!(!cache.should_recompute(true, &none));
    }
}

#[test]
fn unneeded_cache_is_left_stale() {
    let cells = cells();
    let image = corner_mask(MaskKind::Image, 1.0);
    let mut cache = MaskWeightCache::new(cells.len());
    let sources = MaskSources {
        image: Some(&image),
        ..MaskSources::default()
    };
    cache.recompute(&cells, &sources);

    assert!(!cache.should_recompute(false, &MaskSources::default()));
    assert_eq!(cache.active()[0], 1.0);
}

#[test]
#[should_panic(expected = "weight cache does not match cell count")]
fn mismatched_cell_count_panics() {
    let cells = cells();
    let image = corner_mask(MaskKind::Image, 1.0);
    let mut cache = MaskWeightCache::new(3);
    cache.recompute(
        &cells,
        &MaskSources {
            image: Some(&image),
            ..MaskSources::default()
        },
    );
}

#[test]
fn demand_follows_scope_and_breathing() {
    let mut cfg = PixelGridConfig::new(vec![Color::rgb(0, 0, 0)], 10.0);
    cfg.breathing = Breathing {
        enabled: false,
        ..Breathing::default()
    };
    assert!(!mask_weights_needed(&cfg, 0));
    assert!(mask_weights_needed(&cfg, 1), "live ripple under imageMask scope");

    cfg.hover_effects.mode = HoverMode::Reactive;
    assert!(mask_weights_needed(&cfg, 0));

    cfg.hover_effects.interaction_scope = InteractionScope::All;
    assert!(!mask_weights_needed(&cfg, 3));

    cfg.breathing.enabled = true;
    assert!(mask_weights_needed(&cfg, 0));
}

#[test]
fn failed_sources_count_as_absent() {
    let cells = cells();
    let image = corner_mask(MaskKind::Image, 1.0);
    let mut cache = MaskWeightCache::new(cells.len());
    cache.recompute(
        &cells,
        &MaskSources {
            image: Some(&image),
            ..MaskSources::default()
        },
    );
    assert!(!cache.is_zeroed());

    let (handle, loader) = MaskHandle::pending();
    loader.fail("missing file");
    let broken = MaskInfluence::new(MaskKind::Image, 10.0, 10.0, 1.5, handle);
    let sources = MaskSources {
        image: Some(&broken),
        ..MaskSources::default()
    };
    assert!(sources.is_empty());
    assert!(!cache.should_recompute(true, &sources));
    assert!(cache.is_zeroed());
    assert!(cache.active().iter().all(|&w| w == 0.0));
}
