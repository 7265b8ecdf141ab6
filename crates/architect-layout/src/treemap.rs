use architect_core::{AnalyzerError, ArtifactId, LayoutConstants, Rect, Result};
use architect_model::ArtifactArena;

/// A predicate deciding whether an artifact is shown (selected) or hidden
/// (filtered out) for this layout pass. The core only consumes this
/// function; search/filter UX itself lives outside the core.
pub trait ArtifactFilter {
    fn is_shown(&self, id: ArtifactId) -> bool;
}

impl<F> ArtifactFilter for F
where
    F: Fn(ArtifactId) -> bool,
{
    fn is_shown(&self, id: ArtifactId) -> bool {
        self(id)
    }
}

/// Lays out the whole artifact tree starting at the root, writing
/// `frameInScopeContent`/`contentFrame`/`showsParts` onto every artifact.
/// `root_rect` is the screen rectangle given to the root folder; the
/// root's own `frameInScopeContent` is conventionally the whole of
/// `root_rect` since it has no enclosing scope to be framed within.
pub fn layout_tree(
    arena: &mut ArtifactArena,
    root_rect: Rect,
    constants: &LayoutConstants,
    filter: &dyn ArtifactFilter,
) -> Result<()> {
    let root = arena
        .root_id()
        .ok_or_else(|| AnalyzerError::InternalInvariantViolation("arena has no root".into()))?;
    arena
        .get_mut(root)
        .expect("root_id always resolves")
        .metrics
        .frame_in_scope_content = root_rect;
    layout_scope(arena, root, root_rect, constants, filter)
}

/// Lays out `scope_id`'s children within `content_rect`, which is assumed to
/// already be assigned as `scope_id`'s own `contentFrame`.
fn layout_scope(
    arena: &mut ArtifactArena,
    scope_id: ArtifactId,
    content_rect: Rect,
    constants: &LayoutConstants,
    filter: &dyn ArtifactFilter,
) -> Result<()> {
    arena.get_mut(scope_id).unwrap().metrics.content_frame = content_rect;

    let children = arena.get(scope_id).unwrap().children.clone();
    let (shown, hidden): (Vec<ArtifactId>, Vec<ArtifactId>) =
        children.iter().partition(|&&id| filter.is_shown(id));

    if shown.is_empty() {
        tracing::debug!(scope = %scope_id, "no shown parts, collapsing scope to its center");
        arena.get_mut(scope_id).unwrap().metrics.shows_parts = false;
        collapse_all(arena, &children, content_rect.collapsed_to_center());
        return Ok(());
    }

    let fits = arrange(arena, &shown, content_rect, constants, filter)?;
    arena.get_mut(scope_id).unwrap().metrics.shows_parts = fits;
    if fits {
        collapse_all(arena, &hidden, content_rect.collapsed_to_center());
    } else {
        tracing::debug!(scope = %scope_id, "shown parts did not fit, collapsing whole scope");
        collapse_all(arena, &children, content_rect.collapsed_to_center());
    }
    Ok(())
}

/// Places `ids` (already filtered to "shown", already sorted by the Sorter)
/// within `rect`. Returns whether the placement fit — `false` only when a
/// recursive split's halves would drop below `(Wmin, Hmin)`, in which case no
/// frame is written for anything in `ids` and the caller is responsible for
/// collapsing.
fn arrange(
    arena: &mut ArtifactArena,
    ids: &[ArtifactId],
    rect: Rect,
    constants: &LayoutConstants,
    filter: &dyn ArtifactFilter,
) -> Result<bool> {
    if ids.len() == 1 {
        return arrange_single(arena, ids[0], rect, constants, filter);
    }

    let gap = base_gap(rect);
    let split_at = balanced_split_index(arena, ids);
    let (group_a, group_b) = ids.split_at(split_at);

    let loc_a = total_lines_of_code(arena, group_a);
    let loc_b = total_lines_of_code(arena, group_b);
    let total = loc_a + loc_b;
    let fraction_a = if total == 0 {
        0.5
    } else {
        loc_a as f64 / total as f64
    };

    let boundary_a = *group_a.last().expect("group_a is non-empty");
    let boundary_b = *group_b.first().expect("group_b is non-empty");
    let gap_width = if component_rank_of(arena, boundary_a) == component_rank_of(arena, boundary_b)
    {
        gap
    } else {
        3.0 * gap
    };

    let (rect_a, rect_b) = split_rect(rect, fraction_a, gap_width);
    if !rect_a.meets_minimum(constants.min_width, constants.min_height)
        || !rect_b.meets_minimum(constants.min_width, constants.min_height)
    {
        return Ok(false);
    }

    let fits_a = arrange(arena, group_a, rect_a, constants, filter)?;
    let fits_b = arrange(arena, group_b, rect_b, constants, filter)?;
    Ok(fits_a && fits_b)
}

fn arrange_single(
    arena: &mut ArtifactArena,
    id: ArtifactId,
    rect: Rect,
    constants: &LayoutConstants,
    filter: &dyn ArtifactFilter,
) -> Result<bool> {
    arena.get_mut(id).unwrap().metrics.frame_in_scope_content = rect;

    let inner = content_rect_for_single(rect, constants);
    let has_children = !arena.get(id).unwrap().children.is_empty();

    if has_children && inner.meets_minimum(constants.min_width, constants.min_height) {
        layout_scope(arena, id, inner, constants, filter)?;
    } else {
        if has_children {
            tracing::debug!(id = %id, "content area below minimum size, marking childless");
        }
        let collapse_point = inner.collapsed_to_center();
        let artifact = arena.get_mut(id).unwrap();
        artifact.metrics.content_frame = collapse_point;
        artifact.metrics.shows_parts = false;
        let children = artifact.children.clone();
        collapse_all(arena, &children, collapse_point);
    }
    Ok(true)
}

/// `g = 2 * scopeSurface^(1/6)`, recomputed for every split since
/// `scopeSurface` is the area of the rectangle being split at that
/// recursion depth, not the root's.
fn base_gap(rect: Rect) -> f64 {
    2.0 * rect.surface().max(0.0).powf(1.0 / 6.0)
}

/// An artifact's header band plus padding subtracted from `rect`, the inner
/// area where its own children are laid out.
fn content_rect_for_single(rect: Rect, constants: &LayoutConstants) -> Rect {
    let padding = constants.padding;
    let header = constants.header_band_height();
    let width = (rect.width - 2.0 * padding).max(0.0);
    let height = (rect.height - padding - header).max(0.0);
    Rect::new(rect.x + padding, rect.y + header, width, height)
}

/// Splits `rect` along its longer axis at `fraction_a`, leaving `gap_width`
/// between the two halves.
fn split_rect(rect: Rect, fraction_a: f64, gap_width: f64) -> (Rect, Rect) {
    if rect.width >= rect.height {
        let available = (rect.width - gap_width).max(0.0);
        let width_a = available * fraction_a;
        let width_b = available - width_a;
        (
            Rect::new(rect.x, rect.y, width_a, rect.height),
            Rect::new(rect.x + width_a + gap_width, rect.y, width_b, rect.height),
        )
    } else {
        let available = (rect.height - gap_width).max(0.0);
        let height_a = available * fraction_a;
        let height_b = available - height_a;
        (
            Rect::new(rect.x, rect.y, rect.width, height_a),
            Rect::new(rect.x, rect.y + height_a + gap_width, rect.width, height_b),
        )
    }
}

/// The contiguous split index minimizing `|sum(A.LoC) - sum(B.LoC)|` while
/// keeping both groups non-empty and the sorted order intact.
fn balanced_split_index(arena: &ArtifactArena, ids: &[ArtifactId]) -> usize {
    let loc: Vec<u64> = ids
        .iter()
        .map(|&id| arena.get(id).unwrap().metrics.lines_of_code)
        .collect();
    let total: i64 = loc.iter().map(|&v| v as i64).sum();

    let mut best_index = 1;
    let mut best_diff = i64::MAX;
    let mut prefix = 0i64;
    for (i, &value) in loc.iter().enumerate().take(ids.len() - 1) {
        prefix += value as i64;
        let diff = (prefix - (total - prefix)).abs();
        if diff < best_diff {
            best_diff = diff;
            best_index = i + 1;
        }
    }
    best_index
}

fn total_lines_of_code(arena: &ArtifactArena, ids: &[ArtifactId]) -> u64 {
    ids.iter()
        .map(|&id| arena.get(id).unwrap().metrics.lines_of_code)
        .sum()
}

fn component_rank_of(arena: &ArtifactArena, id: ArtifactId) -> Option<u32> {
    arena.get(id).unwrap().metrics.component_rank
}

/// Sets `point` (a degenerate, zero-size rectangle) as both the frame and
/// content frame of every artifact in `ids`, and recurses into their
/// descendants so the whole hidden/overflowing subtree collapses together.
fn collapse_all(arena: &mut ArtifactArena, ids: &[ArtifactId], point: Rect) {
    for &id in ids {
        collapse_subtree(arena, id, point);
    }
}

fn collapse_subtree(arena: &mut ArtifactArena, id: ArtifactId, point: Rect) {
    let children = {
        let artifact = arena.get_mut(id).unwrap();
        artifact.metrics.frame_in_scope_content = point;
        artifact.metrics.content_frame = point;
        artifact.metrics.shows_parts = false;
        artifact.children.clone()
    };
    for child in children {
        collapse_subtree(arena, child, point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use architect_core::{Position, SourceRange, SymbolKind};

    fn range(sl: u32, el: u32) -> SourceRange {
        SourceRange {
            start: Position { line: sl, column: 0 },
            end: Position { line: el, column: 0 },
        }
    }

    fn always_shown(_: ArtifactId) -> bool {
        true
    }

    /// Three siblings of LoC (60, 30, 10) in a 100x100 rectangle with
    /// g=0, P=0. Exercises the split math directly (`split_rect`/
    /// `balanced_split_index`) with an explicit g=0, rather than through
    /// `arrange`'s formula-computed gap, since this fixes g as a given
    /// rather than deriving it from surface area.
    #[test]
    fn three_way_split_matches_worked_example() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let file = arena.create_file(root, "f.rs", vec![]).unwrap();
        let a = arena
            .create_symbol(file, "a", SymbolKind::Function, range(1, 60), range(1, 1), String::new())
            .unwrap();
        let b = arena
            .create_symbol(file, "b", SymbolKind::Function, range(61, 90), range(61, 61), String::new())
            .unwrap();
        let c = arena
            .create_symbol(file, "c", SymbolKind::Function, range(91, 100), range(91, 91), String::new())
            .unwrap();

        arena.get_mut(a).unwrap().metrics.lines_of_code = 60;
        arena.get_mut(b).unwrap().metrics.lines_of_code = 30;
        arena.get_mut(c).unwrap().metrics.lines_of_code = 10;

        let ids = [a, b, c];
        let split_at = balanced_split_index(&arena, &ids);
        assert_eq!(split_at, 1, "should split into ({{60}}, {{30,10}})");

        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let (rect_a, rect_b) = split_rect(rect, 0.6, 0.0);
        assert_relative_eq!(rect_a.x, 0.0);
        assert_relative_eq!(rect_a.width, 60.0);
        assert_relative_eq!(rect_a.height, 100.0);
        assert_relative_eq!(rect_b.x, 60.0);
        assert_relative_eq!(rect_b.width, 40.0);
        assert_relative_eq!(rect_b.height, 100.0);

        let (rect_b1, rect_b2) = split_rect(rect_b, 0.75, 0.0);
        assert_relative_eq!(rect_b1.x, 60.0);
        assert_relative_eq!(rect_b1.y, 0.0);
        assert_relative_eq!(rect_b1.width, 40.0);
        assert_relative_eq!(rect_b1.height, 75.0);
        assert_relative_eq!(rect_b2.x, 60.0);
        assert_relative_eq!(rect_b2.y, 75.0);
        assert_relative_eq!(rect_b2.width, 40.0);
        assert_relative_eq!(rect_b2.height, 25.0);
    }

    /// The same scenario end-to-end through `arrange`, only checking shape
    /// invariants that hold regardless of the formula-derived gap: sibling
    /// frames stay inside the root rect and do not overlap.
    #[test]
    fn three_way_split_end_to_end_produces_non_overlapping_frames() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let file = arena.create_file(root, "f.rs", vec![]).unwrap();
        let a = arena
            .create_symbol(file, "a", SymbolKind::Function, range(1, 60), range(1, 1), String::new())
            .unwrap();
        let b = arena
            .create_symbol(file, "b", SymbolKind::Function, range(61, 90), range(61, 61), String::new())
            .unwrap();
        let c = arena
            .create_symbol(file, "c", SymbolKind::Function, range(91, 100), range(91, 91), String::new())
            .unwrap();

        arena.get_mut(a).unwrap().metrics.lines_of_code = 60;
        arena.get_mut(b).unwrap().metrics.lines_of_code = 30;
        arena.get_mut(c).unwrap().metrics.lines_of_code = 10;

        let constants = LayoutConstants {
            padding: 0.0,
            font_size: 0.0,
            min_width: 0.0,
            min_height: 0.0,
        };
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let fits = arrange(&mut arena, &[a, b, c], rect, &constants, &always_shown).unwrap();
        assert!(fits);

        let frame_a = arena.get(a).unwrap().metrics.frame_in_scope_content;
        let frame_b = arena.get(b).unwrap().metrics.frame_in_scope_content;
        let frame_c = arena.get(c).unwrap().metrics.frame_in_scope_content;

        for frame in [frame_a, frame_b, frame_c] {
            assert!(frame.fits_inside_inflated(&rect, 0.0));
        }
        assert!(!frame_a.overlaps(&frame_b));
        assert!(!frame_a.overlaps(&frame_c));
        assert!(!frame_b.overlaps(&frame_c));
    }

    #[test]
    fn no_shown_parts_collapses_to_scope_center() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let a = arena.create_file(root, "a.rs", vec!["x".into()]).unwrap();
        arena.get_mut(a).unwrap().metrics.lines_of_code = 1;

        let constants = LayoutConstants::default();
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        layout_tree(&mut arena, rect, &constants, &|_: ArtifactId| false).unwrap();

        assert!(!arena.get(root).unwrap().metrics.shows_parts);
        let frame = arena.get(a).unwrap().metrics.frame_in_scope_content;
        assert_relative_eq!(frame.x, 100.0);
        assert_relative_eq!(frame.y, 50.0);
        assert_relative_eq!(frame.width, 0.0);
        assert_relative_eq!(frame.height, 0.0);
    }

    #[test]
    fn single_child_beneath_minimum_size_is_childless() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let file = arena.create_file(root, "f.rs", vec![]).unwrap();
        let sym = arena
            .create_symbol(file, "f", SymbolKind::Function, range(1, 1), range(1, 1), String::new())
            .unwrap();
        arena.get_mut(file).unwrap().metrics.lines_of_code = 1;
        arena.get_mut(sym).unwrap().metrics.lines_of_code = 1;

        let constants = LayoutConstants {
            padding: 4.0,
            font_size: 12.0,
            min_width: 1000.0,
            min_height: 1000.0,
        };
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        layout_tree(&mut arena, rect, &constants, &always_shown).unwrap();

        assert!(!arena.get(file).unwrap().metrics.shows_parts);
        let sym_frame = arena.get(sym).unwrap().metrics.frame_in_scope_content;
        assert_eq!(sym_frame.width, 0.0);
        assert_eq!(sym_frame.height, 0.0);
    }

    #[test]
    fn refused_split_collapses_whole_scope() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let a = arena.create_file(root, "a.rs", vec![]).unwrap();
        let b = arena.create_file(root, "b.rs", vec![]).unwrap();
        arena.get_mut(a).unwrap().metrics.lines_of_code = 1;
        arena.get_mut(b).unwrap().metrics.lines_of_code = 1;

        let constants = LayoutConstants {
            padding: 0.0,
            font_size: 0.0,
            min_width: 50.0,
            min_height: 50.0,
        };
        // An 80x10 rect split in half (minus gap) yields two far-too-narrow halves.
        let rect = Rect::new(0.0, 0.0, 80.0, 10.0);
        layout_tree(&mut arena, rect, &constants, &always_shown).unwrap();

        assert!(!arena.get(root).unwrap().metrics.shows_parts);
        assert_eq!(arena.get(a).unwrap().metrics.frame_in_scope_content.width, 0.0);
        assert_eq!(arena.get(b).unwrap().metrics.frame_in_scope_content.width, 0.0);
    }
}
