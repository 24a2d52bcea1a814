use super::*;

fn frames(prefix: &str, range: std::ops::RangeInclusive<i64>, width: usize) -> Vec<String> {
    range
        .map(|f| format!("{prefix}.{f:0width$}.exr"))
        .collect()
}

#[test]
fn padded_sequence_becomes_one_collection() {
    let out = assemble(frames("/r/render", 1001..=1010, 4));
    assert_eq!(out.collections.len(), 1);
    assert!(out.remainders.is_empty());

    let c = &out.collections[0];
    assert_eq!(c.head, "/r/render.");
    assert_eq!(c.tail, ".exr");
    assert_eq!(c.padding, 4);
    assert_eq!(c.range(), Some(FrameRange::new(1001, 1010).unwrap()));
    assert!(c.is_contiguous());
    assert_eq!(c.to_string(), "/r/render.%04d.exr [1001-1010]");
}

#[test]
fn listing_order_does_not_change_range_or_member_order() {
    let mut names = frames("render", 1..=20, 4);
    names.reverse();
    names.swap(3, 11);

    let out = assemble(names);
    let c = &out.collections[0];
    assert_eq!(c.range(), Some(FrameRange::new(1, 20).unwrap()));
    let indexes: Vec<i64> = c.indexes().collect();
    assert_eq!(indexes, (1..=20).collect::<Vec<_>>());
    assert_eq!(c.items().next(), Some("render.0001.exr"));
}

#[test]
fn unpadded_indexes_of_varying_width_stay_together() {
    let names: Vec<String> = (8..=12).map(|f| format!("plate.{f}.png")).collect();
    let out = assemble(names);
    assert_eq!(out.collections.len(), 1);
    assert_eq!(out.collections[0].padding, 0);
    assert_eq!(out.collections[0].len(), 5);
    assert!(out.remainders.is_empty());
}

#[test]
fn single_file_is_a_remainder() {
    let out = assemble(["/r/shot010_comp.1042.exr"]);
    assert!(out.collections.is_empty());
    assert_eq!(out.remainders, vec!["/r/shot010_comp.1042.exr".to_string()]);
}

#[test]
fn digits_elsewhere_in_the_name_do_not_group() {
    let out = assemble(["/r/shot010/clip_v001.mov", "/r/shot010/clip_v002_notes.txt"]);
    assert!(out.collections.is_empty());
    assert_eq!(out.remainders.len(), 2);
}

#[test]
fn interleaved_sequences_are_ordered_largest_first() {
    let mut names = frames("b", 1..=3, 4);
    names.extend(frames("a", 1..=5, 4));
    names.push("notes.txt".to_string());

    let out = assemble(names);
    assert_eq!(out.collections.len(), 2);
    assert_eq!(out.collections[0].head, "a.");
    assert_eq!(out.collections[1].head, "b.");
    assert_eq!(out.remainders, vec!["notes.txt".to_string()]);
}

#[test]
fn equal_sized_collections_order_by_head() {
    let mut names = frames("zeta", 1..=3, 4);
    names.extend(frames("alpha", 1..=3, 4));
    let out = assemble(names);
    assert_eq!(out.collections[0].head, "alpha.");
    assert_eq!(out.collections[1].head, "zeta.");
}

#[test]
fn holes_are_reported() {
    let names = ["r.0001.exr", "r.0002.exr", "r.0005.exr"];
    let out = assemble(names);
    let c = &out.collections[0];
    assert!(!c.is_contiguous());
    assert_eq!(c.holes(), vec![3, 4]);
    assert_eq!(c.range(), Some(FrameRange::new(1, 5).unwrap()));
}

#[test]
fn empty_input_assembles_to_nothing() {
    let out = assemble(Vec::<String>::new());
    assert_eq!(out, Assembly::default());
}
