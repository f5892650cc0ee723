pub mod m202601100001_create_members;
pub mod m202601100002_create_attendance_records;
