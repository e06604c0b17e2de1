/// Propagates an error from inside a function returning `Option<Result<T, E>>`.
///
/// Evaluates `expr`; an `Ok(t)` yields `t`, an `Err(e)` makes the enclosing
/// function return `Some(Err(e))`.
///
/// This is the `?` equivalent for a `next()` implementation of an
/// `Iterator<Item = Result<T, E>>`: a failing step becomes one erroneous
/// item instead of ending the iteration.
#[macro_export]
macro_rules! try_or_ret_some_err {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => {
                return Some(Err(err));
            }
        }
    };
}
