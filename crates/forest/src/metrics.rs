/// Fraction of positions where prediction equals truth.
///
/// Returns `0.0` for empty input.
pub fn accuracy<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> f32 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();
    correct as f32 / y_true.len() as f32
}
