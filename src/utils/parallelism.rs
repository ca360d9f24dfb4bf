//! Iterators which run in parallel if the `parallel` feature is enabled and sequentially otherwise.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

pub trait MaybeParallelRefIterator<'data> {
    type Iter;

    fn maybe_par_iter(&'data self) -> Self::Iter;
}

#[cfg(feature = "parallel")]
impl<'data, I: 'data + ?Sized> MaybeParallelRefIterator<'data> for I
where
    I: rayon::iter::IntoParallelRefIterator<'data>,
{
    type Iter = I::Iter;

    fn maybe_par_iter(&'data self) -> Self::Iter {
        self.par_iter()
    }
}

#[cfg(not(feature = "parallel"))]
impl<'data, I: 'data + ?Sized> MaybeParallelRefIterator<'data> for I
where
    &'data I: IntoIterator,
{
    type Iter = <&'data I as IntoIterator>::IntoIter;

    fn maybe_par_iter(&'data self) -> Self::Iter {
        self.into_iter()
    }
}
