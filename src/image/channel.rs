use std::ops::Range;

use bitflags::bitflags;

pub const ALPHA_CHANNEL_INDEX: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    Color0,
    Color1,
    Color2,
    Alpha,
}

impl ChannelRole {
    /// Role of the channel at `index`. Indices beyond the alpha channel have no role.
    pub fn of(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Color0),
            1 => Some(Self::Color1),
            2 => Some(Self::Color2),
            ALPHA_CHANNEL_INDEX => Some(Self::Alpha),
            _ => None,
        }
    }
}

bitflags! {
    /// Set of channel roles a transform is allowed to touch.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ChannelSelection: u8 {
        const COLOR0 = 1 << 0;
        const COLOR1 = 1 << 1;
        const COLOR2 = 1 << 2;
        const ALPHA = 1 << 3;

        const COLOR = Self::COLOR0.bits() | Self::COLOR1.bits() | Self::COLOR2.bits();
    }
}

impl From<ChannelRole> for ChannelSelection {
    fn from(value: ChannelRole) -> Self {
        match value {
            ChannelRole::Color0 => Self::COLOR0,
            ChannelRole::Color1 => Self::COLOR1,
            ChannelRole::Color2 => Self::COLOR2,
            ChannelRole::Alpha => Self::ALPHA,
        }
    }
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self::COLOR
    }
}

impl ChannelSelection {
    pub fn contains_role(&self, role: ChannelRole) -> bool {
        self.contains(role.into())
    }

    /// Indices below `channels` whose role is part of the selection.
    pub fn channel_indices(self, channels: u8) -> impl Iterator<Item = u8> {
        (0..channels).filter(move |&index| {
            ChannelRole::of(index).is_some_and(|role| self.contains_role(role))
        })
    }
}

/// Channels touched by spatial filtering.
pub fn color_channels(channels: u8) -> Range<u8> {
    0..channels.min(ALPHA_CHANNEL_INDEX)
}

pub fn alpha_channel(channels: u8) -> Option<u8> {
    (channels > ALPHA_CHANNEL_INDEX).then_some(ALPHA_CHANNEL_INDEX)
}

#[cfg(test)]
mod test {
    use super::{alpha_channel, color_channels, ChannelRole, ChannelSelection};

    #[test]
    fn default_selection_excludes_alpha() {
        let selection = ChannelSelection::default();
        assert!(selection.contains_role(ChannelRole::Color2));
        assert!(!selection.contains_role(ChannelRole::Alpha));
        assert_eq!(selection.channel_indices(4).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn selection_is_limited_by_channel_count() {
        let selection = ChannelSelection::all();
        assert_eq!(selection.channel_indices(2).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(
            selection.channel_indices(4).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn single_role_selection() {
        let selection = ChannelSelection::from(ChannelRole::Alpha);
        assert_eq!(selection.channel_indices(4).collect::<Vec<_>>(), vec![3]);
        assert_eq!(selection.channel_indices(3).count(), 0);
    }

    #[test]
    fn filtered_channels() {
        assert_eq!(color_channels(1), 0..1);
        assert_eq!(color_channels(3), 0..3);
        assert_eq!(color_channels(4), 0..3);
        assert_eq!(alpha_channel(3), None);
        assert_eq!(alpha_channel(4), Some(3));
    }
}
