use serde::{Deserialize, Serialize};

use broker_core::{Fingerprint, Preimage, I256};

/// A payment this party can withdraw: the preimage is known locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownPayment {
    pub amount: I256,
    pub preimage: Preimage,
    pub hashlock: Fingerprint,
}

/// A payment committed by the counterparty whose preimage is still secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyPayment {
    pub amount: I256,
    pub hashlock: Fingerprint,
}

/// One leaf of a channel's payment tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentLeaf {
    Known(KnownPayment),
    Counterparty(CounterpartyPayment),
}

impl PaymentLeaf {
    pub fn hashlock(&self) -> &Fingerprint {
        match self {
            Self::Known(payment) => &payment.hashlock,
            Self::Counterparty(payment) => &payment.hashlock,
        }
    }

    pub fn amount(&self) -> &I256 {
        match self {
            Self::Known(payment) => &payment.amount,
            Self::Counterparty(payment) => &payment.amount,
        }
    }

    pub fn as_known(&self) -> Option<&KnownPayment> {
        match self {
            Self::Known(payment) => Some(payment),
            Self::Counterparty(_) => None,
        }
    }
}
