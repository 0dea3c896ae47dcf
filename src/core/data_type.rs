//! Data type algebra: widest common type for a set of band types, and the
//! narrowest type able to hold a numeric range.
use crate::types::DataType;

/// Return the data type every given type can be cast to without loss, or
/// `None` when there is none (including an empty input).
///
/// Folds left to right. For each pair the narrower type wins if the wider
/// one upcasts from it, otherwise the first upcast of the newcomer that the
/// accumulated type also upcasts to.
pub fn common_data_type(data_types: &[DataType]) -> Option<DataType> {
    let (&first, rest) = data_types.split_first()?;
    rest.iter()
        .try_fold(first, |acc, &next| common_pair(acc, next))
}

fn common_pair(current: DataType, next: DataType) -> Option<DataType> {
    if current == next || next.upcasts().contains(&current) {
        Some(current)
    } else if current.upcasts().contains(&next) {
        Some(next)
    } else {
        next.upcasts()
            .iter()
            .copied()
            .find(|dt| current.upcasts().contains(dt))
    }
}

/// Return the first type, in canonical order, whose range holds `[min, max]`.
///
/// Any float bound, or a bound outside `Int32`, goes straight to `Float64`.
/// A missing `min` is unconstrained; a missing `max` never fits an integer
/// type, so it also lands on `Float64`.
pub fn data_type_from_range(min: Option<f64>, max: Option<f64>, is_float: bool) -> DataType {
    let [int32_min, int32_max] = DataType::Int32.range();
    if is_float
        || min.is_some_and(|m| m < int32_min.as_f64())
        || max.is_some_and(|m| m > int32_max.as_f64())
    {
        return DataType::Float64;
    }
    DataType::ALL
        .into_iter()
        .find(|dt| {
            let [rmin, rmax] = dt.range();
            min.is_none_or(|m| m >= rmin.as_f64()) && max.is_some_and(|m| m <= rmax.as_f64())
        })
        .unwrap_or(DataType::Float64)
}
