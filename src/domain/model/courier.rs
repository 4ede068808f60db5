//! Courier Model
//!
//! A courier delivers orders inside its service regions during its daily
//! working-hour intervals. The courier type fixes the delivery capacity,
//! per-delivery service times and the salary/rating multipliers.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta};

/// Transport type of a courier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourierType {
    Foot,
    Bike,
    Auto,
}

/// Assignment priority order: smallest capacity first, so low-weight
/// orders land on the cheapest vehicle.
pub const COURIER_TYPE_PRIORITY: [CourierType; 3] =
    [CourierType::Foot, CourierType::Bike, CourierType::Auto];

/// Capacity limits of one courier type for a single delivery batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryCapacity {
    /// Maximum total weight carried in one batch, kg
    pub max_weight: f64,
    /// Maximum number of orders in one batch
    pub max_orders: u32,
    /// Maximum distinct regions served in one batch
    pub max_regions: u32,
}

impl CourierType {
    /// Capacity row for this courier type
    pub const fn capacity(self) -> DeliveryCapacity {
        match self {
            CourierType::Foot => DeliveryCapacity {
                max_weight: 10.0,
                max_orders: 2,
                max_regions: 1,
            },
            CourierType::Bike => DeliveryCapacity {
                max_weight: 20.0,
                max_orders: 4,
                max_regions: 2,
            },
            CourierType::Auto => DeliveryCapacity {
                max_weight: 40.0,
                max_orders: 7,
                max_regions: 3,
            },
        }
    }

    /// Service time for the next delivery in a batch.
    ///
    /// The first delivery of a batch takes longer than each subsequent
    /// delivery in the same region; `prior_deliveries` is the number of
    /// orders already carried in the batch.
    pub fn service_time(self, prior_deliveries: u32) -> TimeDelta {
        let minutes = match self {
            CourierType::Foot => {
                if prior_deliveries > 0 {
                    10
                } else {
                    25
                }
            }
            CourierType::Bike => {
                if prior_deliveries > 0 {
                    8
                } else {
                    12
                }
            }
            CourierType::Auto => {
                if prior_deliveries > 0 {
                    4
                } else {
                    8
                }
            }
        };

        TimeDelta::minutes(minutes)
    }

    /// Earnings multiplier applied to the summed order cost
    pub const fn salary_ratio(self) -> u32 {
        match self {
            CourierType::Foot => 2,
            CourierType::Bike => 3,
            CourierType::Auto => 4,
        }
    }

    /// Rating multiplier applied to orders-per-hour
    pub const fn rating_ratio(self) -> u32 {
        match self {
            CourierType::Foot => 3,
            CourierType::Bike => 2,
            CourierType::Auto => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CourierType::Foot => "FOOT",
            CourierType::Bike => "BIKE",
            CourierType::Auto => "AUTO",
        }
    }
}

impl fmt::Display for CourierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourierType {
    type Err = UnknownCourierType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOOT" => Ok(CourierType::Foot),
            "BIKE" => Ok(CourierType::Bike),
            "AUTO" => Ok(CourierType::Auto),
            _ => Err(UnknownCourierType(s.to_string())),
        }
    }
}

/// Error for a courier type string outside {FOOT, BIKE, AUTO}
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown courier type: {0}")]
pub struct UnknownCourierType(pub String);

/// Discount percentage for an order added to a batch already carrying
/// `orders_in_batch` orders (the one being added included).
pub fn batch_discount_percent(orders_in_batch: u32) -> u32 {
    if orders_in_batch <= 1 {
        0
    } else {
        20
    }
}

/// Order cost after the batch discount, truncated to whole units.
pub fn discounted_cost(cost: u32, orders_in_batch: u32) -> u32 {
    cost - cost * batch_discount_percent(orders_in_batch) / 100
}

/// A daily availability slot of a courier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingInterval {
    pub id: u64,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Courier record
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    pub id: u64,
    pub courier_type: CourierType,
    pub regions: Vec<i32>,
    pub working_hours: Vec<WorkingInterval>,
}

/// One (courier, working-hour interval) row the assignment walks.
///
/// Shifts are fetched per courier type, ordered by `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shift {
    pub courier_id: u64,
    pub courier_type: CourierType,
    pub regions: Vec<i32>,
    pub working_hours_id: u64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_table() {
        let foot = CourierType::Foot.capacity();
        assert_eq!(foot.max_weight, 10.0);
        assert_eq!(foot.max_orders, 2);
        assert_eq!(foot.max_regions, 1);

        let bike = CourierType::Bike.capacity();
        assert_eq!(bike.max_weight, 20.0);
        assert_eq!(bike.max_orders, 4);
        assert_eq!(bike.max_regions, 2);

        let auto = CourierType::Auto.capacity();
        assert_eq!(auto.max_weight, 40.0);
        assert_eq!(auto.max_orders, 7);
        assert_eq!(auto.max_regions, 3);
    }

    #[test]
    fn test_service_times() {
        assert_eq!(CourierType::Foot.service_time(0), TimeDelta::minutes(25));
        assert_eq!(CourierType::Foot.service_time(1), TimeDelta::minutes(10));
        assert_eq!(CourierType::Bike.service_time(0), TimeDelta::minutes(12));
        assert_eq!(CourierType::Bike.service_time(3), TimeDelta::minutes(8));
        assert_eq!(CourierType::Auto.service_time(0), TimeDelta::minutes(8));
        assert_eq!(CourierType::Auto.service_time(6), TimeDelta::minutes(4));
    }

    #[test]
    fn test_ratios() {
        assert_eq!(CourierType::Foot.salary_ratio(), 2);
        assert_eq!(CourierType::Bike.salary_ratio(), 3);
        assert_eq!(CourierType::Auto.salary_ratio(), 4);

        assert_eq!(CourierType::Foot.rating_ratio(), 3);
        assert_eq!(CourierType::Bike.rating_ratio(), 2);
        assert_eq!(CourierType::Auto.rating_ratio(), 1);
    }

    #[test]
    fn test_discount_applies_from_second_order() {
        assert_eq!(batch_discount_percent(0), 0);
        assert_eq!(batch_discount_percent(1), 0);
        assert_eq!(batch_discount_percent(2), 20);
        assert_eq!(batch_discount_percent(7), 20);

        assert_eq!(discounted_cost(500, 1), 500);
        assert_eq!(discounted_cost(700, 2), 560);
        // truncation, not rounding
        assert_eq!(discounted_cost(199, 2), 160);
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("FOOT".parse::<CourierType>().unwrap(), CourierType::Foot);
        assert_eq!("BIKE".parse::<CourierType>().unwrap(), CourierType::Bike);
        assert_eq!("AUTO".parse::<CourierType>().unwrap(), CourierType::Auto);
        assert!("foot".parse::<CourierType>().is_err());
        assert!("TRUCK".parse::<CourierType>().is_err());
    }
}
