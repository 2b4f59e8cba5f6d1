/// Exact median. Works on a sorted copy, `data` keeps its order.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let mut data_sorted = data.to_vec();
    data_sorted.sort_by(|a, b| a.total_cmp(b));

    let middle = data_sorted.len() / 2;

    if data_sorted.len() % 2 == 0 {
        Some((data_sorted[middle - 1] + data_sorted[middle]) / 2.0)
    } else {
        Some(data_sorted[middle])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_even() {
        let data = vec![5.0, 17.0, 3.0, 9.0, 14.0, 2.0];

        assert_eq!(median(&data), Some(7.0));
    }

    #[test]
    fn test_median_uneven() {
        let data = vec![5.0, 2.0, 18.0, 8.0, 3.0];

        assert_eq!(median(&data), Some(5.0));
    }

    #[test]
    fn test_median_single() {
        assert_eq!(median(&[0.39]), Some(0.39));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_median_keeps_input_order() {
        let data = vec![3.0, 1.0, 2.0];

        median(&data);

        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }
}
