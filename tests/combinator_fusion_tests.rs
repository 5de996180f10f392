use quickcheck::quickcheck;
use rill_stream::*;

/// Drive a collector by hand the way a well-behaved source would.
fn drain_into<T: Clone, C: Collector<T>>(values: &[T], mut collector: C) -> C::Output {
    for value in values {
        if !collector.needs_more() {
            break;
        }
        collector.accept(value.clone());
    }
    collector.finish()
}

#[test]
fn test_limiting_counts_post_saturation_accepts() {
    // A straggling final value after saturation must stay a no-op, however
    // often accept is retried.
    let mut sink = limiting(to_vec::<i32>(), 2);
    sink.accept(1);
    sink.accept(2);
    assert!(!sink.needs_more());
    sink.accept(3);
    sink.accept(4);
    assert!(!sink.needs_more());
    assert_eq!(sink.finish(), vec![1, 2]);
}

#[test]
fn test_skipping_wants_more_while_still_skipping() {
    // Even over an already-saturated inner sink, a skipping wrapper keeps
    // asking for values until its offset is exhausted.
    let saturated = limiting(to_vec::<i32>(), 0);
    let sink = skipping(saturated, 2);
    assert!(sink.needs_more());
}

#[test]
fn test_skipping_forwards_after_offset() {
    let mut sink = skipping(to_vec::<i32>(), 2);
    for value in 1..=5 {
        sink.accept(value);
    }
    assert_eq!(sink.finish(), vec![3, 4, 5]);
}

#[test]
fn test_filtering_saturation_follows_inner() {
    let mut sink = filtering(limiting(to_vec::<i32>(), 1), |n: &i32| n % 2 == 0);
    assert!(sink.needs_more());
    sink.accept(1);
    assert!(sink.needs_more());
    sink.accept(2);
    assert!(!sink.needs_more());
    assert_eq!(sink.finish(), vec![2]);
}

#[test]
fn test_sink_limiting_fusion_matches_nested() {
    let values: Vec<i32> = (0..20).collect();
    let fused = drain_into(&values, limiting(to_vec(), 7).limiting(3));
    let nested = drain_into(&values, limiting(limiting(to_vec(), 7), 3));
    let direct = drain_into(&values, limiting(to_vec(), 3));
    assert_eq!(fused, direct);
    assert_eq!(nested, direct);
}

#[test]
fn test_sink_skipping_fusion_matches_nested() {
    let values: Vec<i32> = (0..20).collect();
    let fused = drain_into(&values, skipping(to_vec(), 4).skipping(3));
    let nested = drain_into(&values, skipping(skipping(to_vec(), 4), 3));
    let direct = drain_into(&values, skipping(to_vec(), 7));
    assert_eq!(fused, direct);
    assert_eq!(nested, direct);
}

#[test]
fn test_sink_filtering_fusion_conjoins() {
    let values: Vec<i32> = (0..30).collect();
    let fused = drain_into(
        &values,
        filtering(to_vec(), |n: &i32| n % 2 == 0).filtering(|n: &i32| n % 3 == 0),
    );
    let direct = drain_into(&values, filtering(to_vec(), |n: &i32| n % 6 == 0));
    assert_eq!(fused, direct);
}

#[test]
fn test_sink_mapping_fusion_composes() {
    let values: Vec<i32> = (0..10).collect();
    let fused = drain_into(&values, mapping(to_vec(), |n: i32| n + 1).mapping(|n: i32| n * 2));
    let direct = drain_into(&values, mapping(to_vec(), |n: i32| n * 2 + 1));
    assert_eq!(fused, direct);
}

// Repeated application of the same stream adapter fuses into one wrapper;
// the annotations prove it at the type level.
#[test]
fn test_stream_limit_fusion_stays_one_adapter_deep() {
    let mut fused: Limit<Iter<Vec<i32>>> = from_iter(vec![1, 2, 3, 4, 5]).limit(4).limit(2);
    assert_eq!(fused.to_vec().unwrap(), vec![1, 2]);

    let mut widened: Limit<Iter<Vec<i32>>> = from_iter(vec![1, 2, 3, 4, 5]).limit(2).limit(4);
    assert_eq!(widened.to_vec().unwrap(), vec![1, 2]);
}

#[test]
fn test_stream_skip_fusion_stays_one_adapter_deep() {
    let mut fused: Skip<Iter<Vec<i32>>> = from_iter(vec![1, 2, 3, 4, 5]).skip(1).skip(2);
    assert_eq!(fused.to_vec().unwrap(), vec![4, 5]);
}

fn assert_filter_wraps_iter<I, P>(_: &Filter<Iter<I>, P>) {}
fn assert_map_wraps_iter<I, R, F>(_: &Map<Iter<I>, R, F>) {}

#[test]
fn test_stream_filter_fusion_stays_one_adapter_deep() {
    let mut fused = from_iter(vec![1, 2, 3, 4, 5, 6])
        .filter(|n| n % 2 == 0)
        .filter(|n| *n > 2);
    assert_filter_wraps_iter(&fused);
    assert_eq!(fused.to_vec().unwrap(), vec![4, 6]);
}

#[test]
fn test_stream_map_fusion_stays_one_adapter_deep() {
    let mut fused = from_iter(vec![1, 2, 3]).map(|n| n + 1).map(|n| n * 10);
    assert_map_wraps_iter(&fused);
    assert_eq!(fused.to_vec().unwrap(), vec![20, 30, 40]);
}

quickcheck! {
    fn prop_pipeline_matches_iterator_reference(values: Vec<i32>, skip_n: u8, limit_n: u8) -> bool {
        let expected: Vec<i64> = values
            .iter()
            .copied()
            .filter(|n| n % 2 == 0)
            .map(|n| n as i64 * 3)
            .skip(skip_n as usize)
            .take(limit_n as usize)
            .collect();
        let actual = from_iter(values.clone())
            .filter(|n| n % 2 == 0)
            .map(|n| n as i64 * 3)
            .skip(skip_n as u64)
            .limit(limit_n as u64)
            .to_vec()
            .unwrap();
        expected == actual
    }

    fn prop_limit_limit_is_min(values: Vec<i32>, a: u8, b: u8) -> bool {
        let chained = from_iter(values.clone())
            .limit(a as u64)
            .limit(b as u64)
            .to_vec()
            .unwrap();
        let direct = from_iter(values.clone()).limit(a.min(b) as u64).to_vec().unwrap();
        chained == direct
    }

    fn prop_skip_skip_is_sum(values: Vec<i32>, a: u8, b: u8) -> bool {
        let chained = from_iter(values.clone())
            .skip(a as u64)
            .skip(b as u64)
            .to_vec()
            .unwrap();
        let direct = from_iter(values.clone())
            .skip(a as u64 + b as u64)
            .to_vec()
            .unwrap();
        chained == direct
    }

    fn prop_nested_sink_limits_equal_fused(values: Vec<i32>, a: u8, b: u8) -> bool {
        let nested = drain_into(&values, limiting(limiting(to_vec(), a as u64), b as u64));
        let fused = drain_into(&values, limiting(to_vec(), a.min(b) as u64));
        nested == fused
    }
}
