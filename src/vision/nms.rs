use super::{Candidate, Rect};

/// Fraction of `kept`'s area covered by `other`.
///
/// Not intersection-over-union: a small kept box lying inside a larger
/// candidate removes it, while a large kept box leaves small candidates inside
/// it alone.
pub fn overlap_ratio(kept: &Rect, other: &Rect) -> f32 {
    let area = kept.area();
    if area == 0 {
        return 0.0;
    }
    (kept.intersection_area(other) as f64 / area as f64) as f32
}

/// Greedy non-max suppression over the candidates of one template.
///
/// Repeatedly keeps the highest-scoring remaining candidate and drops every
/// other remaining candidate whose [`overlap_ratio`] against it exceeds
/// `overlap_thresh`. Output is in descending score order; equal scores keep
/// their input order.
pub fn non_max_suppression(mut candidates: Vec<Candidate>, overlap_thresh: f32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut keep = vec![true; candidates.len()];
    for i in 0..candidates.len() {
        if !keep[i] {
            continue;
        }
        for j in (i + 1)..candidates.len() {
            if keep[j] && overlap_ratio(&candidates[i].rect, &candidates[j].rect) > overlap_thresh {
                keep[j] = false;
            }
        }
    }

    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, candidate)| keep[index].then_some(candidate))
        .collect()
}

#[cfg(test)]
pub mod test {
    use super::*;

    fn cand(x: u32, y: u32, w: u32, h: u32, score: f32) -> Candidate {
        Candidate {
            rect: Rect::new(x, y, w, h),
            score,
        }
    }

    #[test]
    pub fn keeps_best_of_cluster() {
        let kept = non_max_suppression(
            vec![
                cand(10, 10, 20, 30, 0.91),
                cand(11, 10, 20, 30, 0.97),
                cand(12, 11, 20, 30, 0.93),
                cand(60, 10, 20, 30, 0.92),
            ],
            0.5,
        );
        assert_eq!(kept, vec![cand(11, 10, 20, 30, 0.97), cand(60, 10, 20, 30, 0.92)]);
    }

    #[test]
    pub fn threshold_is_exclusive() {
        // exactly half of the kept box is covered
        let kept = non_max_suppression(vec![cand(0, 0, 10, 10, 0.9), cand(5, 0, 10, 10, 0.8)], 0.5);
        assert_eq!(kept.len(), 2);
        let kept = non_max_suppression(vec![cand(0, 0, 10, 10, 0.9), cand(4, 0, 10, 10, 0.8)], 0.5);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    pub fn overlap_is_asymmetric() {
        let big = Rect::new(0, 0, 20, 20);
        let small = Rect::new(2, 2, 6, 6);
        assert!((overlap_ratio(&big, &small) - 0.09).abs() < 1e-6);
        assert_eq!(overlap_ratio(&small, &big), 1.0);

        // small box kept first removes the big one around it
        let kept = non_max_suppression(vec![cand(0, 0, 20, 20, 0.95), cand(2, 2, 6, 6, 0.99)], 0.5);
        assert_eq!(kept, vec![cand(2, 2, 6, 6, 0.99)]);

        // big box kept first leaves the small one inside it
        let kept = non_max_suppression(vec![cand(2, 2, 6, 6, 0.95), cand(0, 0, 20, 20, 0.99)], 0.5);
        assert_eq!(kept, vec![cand(0, 0, 20, 20, 0.99), cand(2, 2, 6, 6, 0.95)]);

        let kept = non_max_suppression(vec![cand(0, 0, 20, 20, 0.99), cand(1, 1, 20, 20, 0.95)], 0.5);
        assert_eq!(kept, vec![cand(0, 0, 20, 20, 0.99)]);
    }

    #[test]
    pub fn output_respects_bound_and_is_fixed_point() {
        let mut candidates = vec![];
        for i in 0..40u32 {
            let x = (i * 7) % 53;
            let y = (i * 11) % 17;
            let score = 0.9 + ((i * 13) % 10) as f32 / 100.0;
            candidates.push(cand(x, y, 12, 16, score));
        }
        let kept = non_max_suppression(candidates, 0.5);
        assert!(!kept.is_empty());
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                assert!(a.score >= b.score);
                assert!(overlap_ratio(&a.rect, &b.rect) <= 0.5);
            }
        }
        assert_eq!(non_max_suppression(kept.clone(), 0.5), kept);
    }

    #[test]
    pub fn empty_input() {
        assert!(non_max_suppression(vec![], 0.5).is_empty());
    }
}
