use std::collections::HashMap;

use prodsearch_common::{ProdSearchError, Result};
use tracing::debug;

use crate::types::{AggregatedProduct, SearchHit};

/// Max chunk texts sampled into each product's `relevant_chunks`
const RELEVANT_CHUNK_SAMPLE: usize = 3;

/// Fold chunk-level search hits back into unique products
///
/// Hits arrive ordered by relevance and may contain several hits per
/// product. Groups form in first-occurrence order over the hit list and
/// only the first `max_products` groups are aggregated; an early low-score
/// hit can therefore claim a slot ahead of a later high-score hit for a
/// product not yet seen. The aggregated groups are then sorted by their
/// best chunk score and truncated.
///
/// Pure function of its inputs. Empty input yields an empty result.
pub fn aggregate_hits(
    hits: &[SearchHit],
    max_products: usize,
) -> Result<Vec<AggregatedProduct>> {
    if max_products == 0 {
        return Err(ProdSearchError::config(
            "Max products must be greater than 0",
        ));
    }

    // Group hits by product, preserving arrival order within each group
    // and first-occurrence order across groups.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&SearchHit>> = HashMap::new();
    for hit in hits {
        let group = groups.entry(hit.product_id.as_str()).or_insert_with(|| {
            order.push(hit.product_id.as_str());
            Vec::new()
        });
        group.push(hit);
    }

    let mut results: Vec<AggregatedProduct> = order
        .iter()
        .take(max_products)
        .map(|product_id| {
            let group = &groups[product_id];

            // Representative: highest score, first-seen wins on ties
            let mut best = group[0];
            for hit in &group[1..] {
                if hit.score > best.score {
                    best = *hit;
                }
            }

            AggregatedProduct {
                product_id: best.product_id.clone(),
                name: best.name.clone(),
                url: best.url.clone(),
                brand: best.brand.clone(),
                category_name: best.category_name.clone(),
                price: best.price,
                market_price: best.market_price,
                average_rating: best.average_rating,
                score: best.score,
                description: best.chunk_text.clone(),
                relevant_chunks: group
                    .iter()
                    .take(RELEVANT_CHUNK_SAMPLE)
                    .map(|h| h.chunk_text.clone())
                    .collect(),
                total_chunks_found: group.len(),
            }
        })
        .collect();

    // Stable sort keeps first-occurrence order on equal scores
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(max_products);

    debug!(
        "Aggregated {} hits into {} products",
        hits.len(),
        results.len()
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(product_id: &str, score: f32, chunk_text: &str) -> SearchHit {
        SearchHit {
            product_id: product_id.to_string(),
            name: format!("Product {}", product_id),
            url: None,
            brand: None,
            category_name: None,
            price: Some(10.0),
            market_price: None,
            average_rating: None,
            chunk_text: chunk_text.to_string(),
            chunk_id: 0,
            score,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let results = aggregate_hits(&[], 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_max_products_rejected() {
        assert!(aggregate_hits(&[hit("1", 0.5, "a")], 0).is_err());
    }

    #[test]
    fn test_groups_fold_to_best_chunk() {
        let hits = vec![
            hit("1", 0.9, "chunk a"),
            hit("2", 0.95, "chunk b"),
            hit("1", 0.5, "chunk c"),
        ];
        let results = aggregate_hits(&hits, 2).unwrap();

        assert_eq!(results.len(), 2);
        // Sorted by best score: product 2 (0.95) before product 1 (0.9)
        assert_eq!(results[0].product_id, "2");
        assert_eq!(results[1].product_id, "1");
        assert_eq!(results[1].score, 0.9);
        assert_eq!(results[1].total_chunks_found, 2);
        assert_eq!(results[1].description, "chunk a");
    }

    #[test]
    fn test_relevant_chunks_samples_first_three_in_arrival_order() {
        let hits = vec![
            hit("1", 0.9, "first"),
            hit("1", 0.7, "second"),
            hit("1", 0.95, "third"),
            hit("1", 0.6, "fourth"),
        ];
        let results = aggregate_hits(&hits, 5).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relevant_chunks, vec!["first", "second", "third"]);
        assert_eq!(results[0].total_chunks_found, 4);
        // Representative is the best chunk, not the first
        assert_eq!(results[0].score, 0.95);
        assert_eq!(results[0].description, "third");
    }

    #[test]
    fn test_cap_on_distinct_products() {
        let hits = vec![
            hit("1", 0.9, "a"),
            hit("2", 0.8, "b"),
            hit("3", 0.7, "c"),
            hit("4", 0.6, "d"),
            hit("5", 0.5, "e"),
        ];
        let results = aggregate_hits(&hits, 3).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_slot_claiming_follows_first_occurrence_not_score() {
        // Product 3 scores highest but is first seen after products 1 and 2
        // have claimed both slots, so it never forms a group.
        let hits = vec![
            hit("1", 0.3, "a"),
            hit("2", 0.4, "b"),
            hit("3", 0.99, "c"),
        ];
        let results = aggregate_hits(&hits, 2).unwrap();

        assert_eq!(results.len(), 2);
        let ids: Vec<&str> = results.iter().map(|r| r.product_id.as_str()).collect();
        assert!(ids.contains(&"1"));
        assert!(ids.contains(&"2"));
        assert!(!ids.contains(&"3"));
        // Within the claimed slots, ordering is still by score
        assert_eq!(results[0].product_id, "2");
    }

    #[test]
    fn test_tie_break_is_first_seen() {
        let hits = vec![hit("1", 0.5, "early"), hit("1", 0.5, "late")];
        let results = aggregate_hits(&hits, 1).unwrap();
        assert_eq!(results[0].description, "early");
    }

    #[test]
    fn test_result_never_exceeds_distinct_products() {
        let hits = vec![hit("1", 0.9, "a"), hit("1", 0.8, "b")];
        let results = aggregate_hits(&hits, 10).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let hits = vec![
            hit("1", 0.9, "a"),
            hit("2", 0.9, "b"),
            hit("3", 0.7, "c"),
        ];
        let first = aggregate_hits(&hits, 2).unwrap();
        let second = aggregate_hits(&hits, 2).unwrap();
        let ids = |rs: &[AggregatedProduct]| {
            rs.iter().map(|r| r.product_id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }
}
