use std::ops::Div;

use faer::{Col, ColRef, unzip, zip};

use crate::E;

/// `1 / x`, elementwise.
pub(crate) fn cwise_inverse<'a>(x: ColRef<'a, E>) -> Col<E>
where
    E: Div<Output = E>,
{
    let mut out = Col::<E>::zeros(x.nrows());

    zip!(x, out.as_mut()).for_each(|unzip!(x, out)| *out = E::from(1.) / *x);

    out
}
