use rapier2d::prelude::*;

/// Tag stored in the upper bits of a collider's `user_data` so packed filter
/// data can be told apart from other user data
const FILTER_TAG: u128 = 0x5045_4649 << 64;
const TAG_MASK: u128 = 0xFFFF_FFFF << 64;

/// Box2D style collision filter: category/mask bits plus a group index
///
/// Fixtures sharing a non-zero group index always collide when the index is
/// positive and never collide when it is negative. Otherwise a pair collides
/// when each fixture's mask accepts the other's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterData {
    pub category_bits: u16,
    pub mask_bits: u16,
    pub group_index: i16,
}

impl Default for FilterData {
    fn default() -> Self {
        Self {
            category_bits: 0x0001,
            mask_bits: 0xFFFF,
            group_index: 0,
        }
    }
}

impl FilterData {
    pub fn new(category_bits: u16, mask_bits: u16, group_index: i16) -> Self {
        Self {
            category_bits,
            mask_bits,
            group_index,
        }
    }

    /// Box2D's `ShouldCollide` rule
    pub fn should_collide(&self, other: &FilterData) -> bool {
        if self.group_index == other.group_index && self.group_index != 0 {
            return self.group_index > 0;
        }

        (self.mask_bits & other.category_bits) != 0 && (self.category_bits & other.mask_bits) != 0
    }

    /// Whether rapier's interaction groups alone can express this filter
    pub fn needs_hooks(&self) -> bool {
        self.group_index != 0
    }

    /// Convert category/mask into rapier's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.category_bits as u32),
            Group::from_bits_truncate(self.mask_bits as u32),
        )
    }

    /// Pack into a collider `user_data` value
    pub fn to_user_data(self) -> u128 {
        FILTER_TAG
            | (self.category_bits as u128) << 32
            | (self.mask_bits as u128) << 16
            | (self.group_index as u16 as u128)
    }

    /// Unpack from a collider `user_data` value written by [`FilterData::to_user_data`]
    pub fn from_user_data(data: u128) -> Option<Self> {
        if data & TAG_MASK != FILTER_TAG {
            return None;
        }

        Some(Self {
            category_bits: (data >> 32) as u16,
            mask_bits: (data >> 16) as u16,
            group_index: data as u16 as i16,
        })
    }

    /// Filter of any collider, falling back to its interaction groups
    pub fn from_collider(collider: &Collider) -> Self {
        Self::from_user_data(collider.user_data).unwrap_or_else(|| {
            let groups = collider.collision_groups();
            Self::new(
                groups.memberships.bits() as u16,
                groups.filter.bits() as u16,
                0,
            )
        })
    }
}

/// Physics hooks applying [`FilterData::should_collide`] to colliders that
/// carry a group index
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFilterHooks;

impl FixtureFilterHooks {
    fn pair_collides(context: &PairFilterContext) -> bool {
        match (
            context.colliders.get(context.collider1),
            context.colliders.get(context.collider2),
        ) {
            (Some(a), Some(b)) => {
                FilterData::from_collider(a).should_collide(&FilterData::from_collider(b))
            }
            _ => true,
        }
    }
}

impl PhysicsHooks for FixtureFilterHooks {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        Self::pair_collides(context).then_some(SolverFlags::COMPUTE_IMPULSES)
    }

    fn filter_intersection_pair(&self, context: &PairFilterContext) -> bool {
        Self::pair_collides(context)
    }
}
