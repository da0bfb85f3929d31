mod tests {
    use myrtio_marquee::{ClockMode, Command, CommandError, FontLevel, ScrollSpeed};

    #[test]
    fn test_clock_mode_arguments() {
        assert_eq!(Command::parse("t/0"), Ok(Command::ClockMode(ClockMode::Off)));
        assert_eq!(
            Command::parse("t/1"),
            Ok(Command::ClockMode(ClockMode::TimeOnly))
        );
        assert_eq!(
            Command::parse("t/2"),
            Ok(Command::ClockMode(ClockMode::TimeAndDate))
        );
        assert_eq!(Command::parse("t/7"), Ok(Command::ClockMode(ClockMode::Off)));
        assert_eq!(Command::parse("t/"), Ok(Command::ClockMode(ClockMode::Off)));
    }

    #[test]
    fn test_timezone_clamps_to_bounds() {
        for hours in -12..=14 {
            let line = format!("tz/{hours}");
            assert_eq!(Command::parse(&line), Ok(Command::Timezone(hours)));
        }
        assert_eq!(Command::parse("tz/+3"), Ok(Command::Timezone(3)));
        assert_eq!(Command::parse("tz/-20"), Ok(Command::Timezone(-12)));
        assert_eq!(Command::parse("tz/99"), Ok(Command::Timezone(14)));
        assert_eq!(Command::parse("tz/99999999999"), Ok(Command::Timezone(14)));
        assert_eq!(
            Command::parse("tz/-99999999999999999999999"),
            Ok(Command::Timezone(-12))
        );
        assert_eq!(Command::parse("tz/-"), Err(CommandError::InvalidTimezone));
        assert_eq!(Command::parse("tz/abc"), Err(CommandError::InvalidTimezone));
        assert_eq!(Command::parse("tz/"), Err(CommandError::InvalidTimezone));
    }

    #[test]
    fn test_scroll_speed_interval() {
        assert_eq!(ScrollSpeed::new(0).unwrap().interval_ms(), None);
        for level in 1..=9_u8 {
            let expected = (110 - u32::from(level) * 10).clamp(5, 100);
            let Ok(Command::ScrollSpeed(speed)) = Command::parse(&format!("s/{level}")) else {
                panic!("s/{level} did not parse");
            };
            assert_eq!(speed.level(), level);
            assert_eq!(speed.interval_ms(), Some(expected));
        }
        assert_eq!(ScrollSpeed::new(1).unwrap().interval_ms(), Some(100));
        assert_eq!(ScrollSpeed::new(9).unwrap().interval_ms(), Some(20));
        assert_eq!(ScrollSpeed::new(10), None);
    }

    #[test]
    fn test_scroll_speed_rejects_non_digit() {
        assert_eq!(Command::parse("s/x"), Err(CommandError::InvalidScrollSpeed));
        assert_eq!(Command::parse("s/10"), Err(CommandError::InvalidScrollSpeed));
        assert_eq!(Command::parse("s/"), Err(CommandError::InvalidScrollSpeed));
    }

    #[test]
    fn test_visibility_and_font() {
        assert_eq!(Command::parse("h/1"), Ok(Command::TickerVisible(true)));
        assert_eq!(Command::parse("h/0"), Ok(Command::TickerVisible(false)));
        assert_eq!(Command::parse("h/2"), Err(CommandError::InvalidVisibility));
        assert_eq!(Command::parse("f/1"), Ok(Command::Font(FontLevel::Small)));
        assert_eq!(Command::parse("f/2"), Ok(Command::Font(FontLevel::Medium)));
        assert_eq!(Command::parse("f/3"), Ok(Command::Font(FontLevel::Large)));
        assert_eq!(Command::parse("f/4"), Err(CommandError::InvalidFont));
    }

    #[test]
    fn test_set_time_literal() {
        assert_eq!(
            Command::parse("ts/09:05:07"),
            Ok(Command::SetTime {
                hour: 9,
                minute: 5,
                second: 7
            })
        );
        // Range is checked when seeding, not when parsing.
        assert_eq!(
            Command::parse("ts/25:00:00"),
            Ok(Command::SetTime {
                hour: 25,
                minute: 0,
                second: 0
            })
        );
        assert_eq!(Command::parse("ts/9:05:07"), Err(CommandError::InvalidTime));
        assert_eq!(Command::parse("ts/09-05-07"), Err(CommandError::InvalidTime));
        assert_eq!(Command::parse("ts/09:05:0x"), Err(CommandError::InvalidTime));
    }

    #[test]
    fn test_network_commands() {
        assert_eq!(Command::parse("w/home"), Ok(Command::NetworkName("home")));
        assert_eq!(Command::parse("wp/s3cret"), Ok(Command::NetworkSecret("s3cret")));
        assert_eq!(Command::parse("wc/"), Ok(Command::Connect));
        assert_eq!(Command::parse("wf/"), Ok(Command::Forget));
        let long_name = format!("w/{}", "n".repeat(33));
        assert_eq!(
            Command::parse(&long_name),
            Err(CommandError::NetworkNameTooLong)
        );
    }

    #[test]
    fn test_unmatched_lines_are_text() {
        assert_eq!(Command::parse("hello world"), Ok(Command::Text("hello world")));
        assert_eq!(Command::parse("t1"), Ok(Command::Text("t1")));
        assert_eq!(Command::parse("x/1"), Ok(Command::Text("x/1")));
        assert_eq!(Command::parse("wx/"), Ok(Command::Text("wx/")));
    }

    #[test]
    fn test_only_clock_commands_keep_clock() {
        assert!(!Command::ClockMode(ClockMode::TimeOnly).exits_clock());
        assert!(Command::Timezone(2).exits_clock());
        assert!(Command::Text("hi").exits_clock());
        assert!(Command::Connect.exits_clock());
    }
}
