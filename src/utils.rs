#[cfg(not(feature = "loom"))]
macro_rules! maybe_const {
    ($( #[$attr:meta] )* $v:vis const $($i:tt)*) => { $( #[$attr] )* $v const $($i)* };
}

#[cfg(feature = "loom")]
macro_rules! maybe_const {
    ($( #[$attr:meta] )* $v:vis const $($i:tt)*) => { $( #[$attr] )* $v $($i)* };
}
