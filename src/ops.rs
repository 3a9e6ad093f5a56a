// src/ops.rs
//! Operator overloads forwarding to the named multivector methods.
//!
//! | operator | method |
//! |----------|--------|
//! | `a * b`  | [`MultiVector::geometric_product`] |
//! | `a ^ b`  | [`MultiVector::outer_product`] |
//! | `a \| b` | [`MultiVector::inner_product`] |
//! | `a / b`  | [`MultiVector::divide`] |
//! | `!a`     | [`MultiVector::reverse`] |
//! | `a <<= b`| [`MultiVector::accumulate`] |
//!
//! Operators cannot return a `Result`, so a layout mismatch or a singular
//! divisor panics with the error's message. Use the named methods to handle
//! those cases.

use std::ops::{
    Add, AddAssign, BitOr, BitXor, Div, Index, IndexMut, Mul, MulAssign, Neg, Not, ShlAssign, Sub,
    SubAssign,
};

use crate::multivector::MultiVector;
use crate::types::Scalar;

macro_rules! forward_binop {
    ($Trait:ident, $method:ident, $call:ident) => {
        impl $Trait<&MultiVector> for &MultiVector {
            type Output = MultiVector;
            fn $method(self, rhs: &MultiVector) -> MultiVector {
                self.$call(rhs).unwrap_or_else(|e| panic!("{e}"))
            }
        }

        impl $Trait<MultiVector> for MultiVector {
            type Output = MultiVector;
            fn $method(self, rhs: MultiVector) -> MultiVector {
                $Trait::$method(&self, &rhs)
            }
        }

        impl $Trait<&MultiVector> for MultiVector {
            type Output = MultiVector;
            fn $method(self, rhs: &MultiVector) -> MultiVector {
                $Trait::$method(&self, rhs)
            }
        }

        impl $Trait<MultiVector> for &MultiVector {
            type Output = MultiVector;
            fn $method(self, rhs: MultiVector) -> MultiVector {
                $Trait::$method(self, &rhs)
            }
        }

        impl $Trait<Scalar> for &MultiVector {
            type Output = MultiVector;
            fn $method(self, rhs: Scalar) -> MultiVector {
                self.$call(rhs).unwrap_or_else(|e| panic!("{e}"))
            }
        }

        impl $Trait<Scalar> for MultiVector {
            type Output = MultiVector;
            fn $method(self, rhs: Scalar) -> MultiVector {
                $Trait::$method(&self, rhs)
            }
        }
    };
}

forward_binop!(Mul, mul, geometric_product);
forward_binop!(BitXor, bitxor, outer_product);
forward_binop!(BitOr, bitor, inner_product);
forward_binop!(Add, add, checked_add);
forward_binop!(Sub, sub, checked_sub);
forward_binop!(Div, div, divide);

// scalar on the left
impl Mul<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn mul(self, rhs: &MultiVector) -> MultiVector {
        rhs.scale(self)
    }
}

impl Mul<MultiVector> for Scalar {
    type Output = MultiVector;
    fn mul(self, rhs: MultiVector) -> MultiVector {
        rhs.scale(self)
    }
}

impl BitXor<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn bitxor(self, rhs: &MultiVector) -> MultiVector {
        rhs.scale(self)
    }
}

impl BitOr<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn bitor(self, rhs: &MultiVector) -> MultiVector {
        MultiVector::zero(rhs.layout())
    }
}

impl Add<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn add(self, rhs: &MultiVector) -> MultiVector {
        rhs + self
    }
}

impl Sub<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn sub(self, rhs: &MultiVector) -> MultiVector {
        -(rhs - self)
    }
}

impl Div<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn div(self, rhs: &MultiVector) -> MultiVector {
        rhs.inv().unwrap_or_else(|e| panic!("{e}")).scale(self)
    }
}

impl Neg for &MultiVector {
    type Output = MultiVector;
    fn neg(self) -> MultiVector {
        self.scale(-1.0)
    }
}

impl Neg for MultiVector {
    type Output = MultiVector;
    fn neg(self) -> MultiVector {
        self.scale(-1.0)
    }
}

/// `!M` is the reversion `~M`.
impl Not for &MultiVector {
    type Output = MultiVector;
    fn not(self) -> MultiVector {
        self.reverse()
    }
}

impl Not for MultiVector {
    type Output = MultiVector;
    fn not(self) -> MultiVector {
        self.reverse()
    }
}

impl AddAssign<&MultiVector> for MultiVector {
    fn add_assign(&mut self, rhs: &MultiVector) {
        self.accumulate(rhs).unwrap_or_else(|e| panic!("{e}"));
    }
}

impl AddAssign<Scalar> for MultiVector {
    fn add_assign(&mut self, rhs: Scalar) {
        self.accumulate(rhs).unwrap_or_else(|e| panic!("{e}"));
    }
}

impl SubAssign<&MultiVector> for MultiVector {
    fn sub_assign(&mut self, rhs: &MultiVector) {
        self.accumulate(&rhs.scale(-1.0)).unwrap_or_else(|e| panic!("{e}"));
    }
}

impl MulAssign<Scalar> for MultiVector {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = self.scale(rhs);
    }
}

/// `M <<= N` accumulates `N` into `M` in place.
impl ShlAssign<&MultiVector> for MultiVector {
    fn shl_assign(&mut self, rhs: &MultiVector) {
        self.accumulate(rhs).unwrap_or_else(|e| panic!("{e}"));
    }
}

impl Index<usize> for MultiVector {
    type Output = Scalar;
    fn index(&self, index: usize) -> &Scalar {
        &self.value()[index]
    }
}

impl IndexMut<usize> for MultiVector {
    fn index_mut(&mut self, index: usize) -> &mut Scalar {
        &mut self.value_mut()[index]
    }
}
